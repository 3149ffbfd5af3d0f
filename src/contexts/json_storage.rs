use crate::data::Storage;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Structured layer over a raw [`Storage`]: values go in and out as JSON.
///
/// Malformed stored text is treated exactly like a missing key.
#[derive(Debug)]
pub struct JsonStorage<S: Storage> {
    inner: S,
}

impl<S: Storage> JsonStorage<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Reads and decodes the value stored under `key`.
    ///
    /// # Returns
    /// * `Some(T)` - The decoded value
    /// * `None` - If the key is missing or its text is not valid JSON for `T`
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.inner.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(key, error = %e, "discarding malformed stored value");
                None
            }
        }
    }

    /// Encodes `value` and writes it under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(text) => self.inner.set(key, &text),
            Err(e) => warn!(key, error = %e, "failed to serialize value for storage"),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}
