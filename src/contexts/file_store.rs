use crate::data::Storage;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// FileStore is an implementation of the Storage trait that keeps each key in
/// its own file.
///
/// The store is organized as: `{folder}/{key}.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    /// The root folder path for the store (defaults to ".jjal")
    folder: PathBuf,
}

impl FileStore {
    /// Creates a new FileStore instance
    ///
    /// # Arguments
    /// * `folder` - Optional root folder path. If None, defaults to ".jjal"
    pub fn new(folder: Option<PathBuf>) -> Self {
        Self {
            folder: folder.unwrap_or_else(|| PathBuf::from(".jjal")),
        }
    }

    pub fn folder(&self) -> &PathBuf {
        &self.folder
    }

    /// Path format: `{folder}/{key}.json`.
    /// Keys are the fixed preference names, which are already safe for filenames.
    fn get_entry_path(&self, key: &str) -> PathBuf {
        self.folder.join(format!("{}.json", key))
    }
}

impl Storage for FileStore {
    /// Returns `None` if the entry file doesn't exist or cannot be read.
    fn get(&self, key: &str) -> Option<String> {
        let path = self.get_entry_path(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "store entry not readable");
                None
            }
        }
    }

    /// Creates the store folder if needed. Errors are logged, never panicked.
    fn set(&self, key: &str, value: &str) {
        let path = self.get_entry_path(key);

        if let Err(e) = fs::create_dir_all(&self.folder) {
            warn!(folder = %self.folder.display(), error = %e, "failed to create store directory");
            return;
        }

        if let Err(e) = fs::write(&path, value) {
            warn!(path = %path.display(), error = %e, "failed to write store entry");
        }
    }
}
