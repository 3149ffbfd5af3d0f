use crate::validation::{contains_hangul, normalize_caption};
use std::fmt;
use thiserror::Error;

/// Reasons a caption is refused before any request is made.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionError {
    #[error("Hangul characters are not allowed in a caption")]
    Hangul,
    #[error("caption must not be empty")]
    Empty,
}

/// A caption that passed input validation: upper-cased, trimmed, non-empty
/// and free of Hangul.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption(String);

impl Caption {
    /// Validates raw user input and builds a caption from it.
    ///
    /// The Hangul check runs on the untrimmed input, so it takes precedence
    /// over the empty check.
    pub fn parse(raw: &str) -> Result<Self, CaptionError> {
        let upper = normalize_caption(raw);
        if contains_hangul(&upper) {
            return Err(CaptionError::Hangul);
        }
        let trimmed = upper.trim();
        if trimmed.is_empty() {
            return Err(CaptionError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
