/// Storage key for the usage counter.
pub const COUNTER_KEY: &str = "counter";

/// Storage key for the favorites list.
pub const FAVORITES_KEY: &str = "favorites";

/// Raw key/value storage for preference values.
///
/// Implementations should handle errors gracefully without panicking.
pub trait Storage {
    /// Retrieves the stored text for the given key.
    ///
    /// # Returns
    /// * `Some(String)` - The stored text if present and readable
    /// * `None` - If the key doesn't exist or retrieval fails
    fn get(&self, key: &str) -> Option<String>;

    /// Stores text under the given key, replacing any previous value.
    ///
    /// # Notes
    /// Errors during storage are logged, not returned. Writes are
    /// fire-and-forget and durable only as far as the backing medium is.
    fn set(&self, key: &str, value: &str);
}
