use crate::validation::is_image_url;
use serde::Serialize;
use std::fmt;

/// A validated absolute http(s) URL pointing at a generated cat image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wraps `url` if it passes the image URL check.
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        is_image_url(&url).then_some(Self(url))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
