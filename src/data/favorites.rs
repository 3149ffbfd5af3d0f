use super::ImageRef;
use crate::validation::is_image_url;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

/// Ordered list of favorite images with set semantics.
///
/// Insertion order is preserved and an image appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FavoritesList {
    entries: Vec<ImageRef>,
}

impl FavoritesList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from raw stored values.
    ///
    /// Keeps only strings that are image URLs and drops repeats, preserving
    /// the first occurrence of each.
    pub fn sanitize(values: &[Value]) -> Self {
        let mut list = Self::new();
        for value in values {
            if let Some(image) = value.as_str().and_then(ImageRef::new) {
                list.add(&image);
            }
        }
        list
    }

    pub fn contains(&self, image: &ImageRef) -> bool {
        self.entries.contains(image)
    }

    /// Appends `image` unless it is already present.
    ///
    /// Returns false when nothing changed.
    pub fn add(&mut self, image: &ImageRef) -> bool {
        if self.contains(image) {
            return false;
        }
        self.entries.push(image.clone());
        self.dedup();
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageRef> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[ImageRef] {
        &self.entries
    }

    /// The entries to render, re-checked and deduplicated again.
    pub fn display_view(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(ImageRef::as_str)
            .filter(|url| is_image_url(url))
            .filter(|url| seen.insert(*url))
            .collect()
    }

    fn dedup(&mut self) {
        let mut seen = HashSet::new();
        self.entries.retain(|image| seen.insert(image.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn image(url: &str) -> ImageRef {
        ImageRef::new(url).unwrap()
    }

    #[test]
    fn test_sanitize_filters_and_dedupes() {
        let raw = json!([
            "https://cataas.com/cat/a",
            "",
            42,
            null,
            "ftp://nope",
            "https://cataas.com/cat/b",
            "https://cataas.com/cat/a",
            {"url": "https://cataas.com/cat/c"},
        ]);
        let list = FavoritesList::sanitize(raw.as_array().unwrap());
        let urls: Vec<&str> = list.iter().map(ImageRef::as_str).collect();
        assert_eq!(
            urls,
            vec!["https://cataas.com/cat/a", "https://cataas.com/cat/b"]
        );
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut list = FavoritesList::new();
        let cat = image("https://cataas.com/cat/a");

        assert!(list.add(&cat));
        assert!(!list.add(&cat));
        assert_eq!(list.len(), 1);
        assert!(list.contains(&cat));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut list = FavoritesList::new();
        list.add(&image("https://cataas.com/cat/b"));
        list.add(&image("https://cataas.com/cat/a"));
        assert_eq!(
            list.display_view(),
            vec!["https://cataas.com/cat/b", "https://cataas.com/cat/a"]
        );
    }

    #[test]
    fn test_serializes_as_string_array() {
        let mut list = FavoritesList::new();
        list.add(&image("https://cataas.com/cat/a"));
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!(["https://cataas.com/cat/a"])
        );
    }
}
