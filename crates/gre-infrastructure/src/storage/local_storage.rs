//! File-backed [`LocalStorage`] persisted as a flat JSON object.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use gre_core::auth::LocalStorage;
use gre_core::{GreError, Result};

use super::atomic_json::AtomicJsonFile;

type Entries = BTreeMap<String, String>;

/// Durable key-value storage in a single `local_storage.json`.
pub struct FileLocalStorage {
    file: AtomicJsonFile<Entries>,
}

impl FileLocalStorage {
    pub fn new(path: PathBuf) -> Self {
        tracing::debug!(path = %path.display(), "Using file-backed local storage");
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    /// Discards a file that no longer parses so writes can start over.
    fn discard_if_corrupt(&self) -> Result<()> {
        match self.file.load() {
            Err(GreError::Serialization { message, .. }) => {
                tracing::warn!(
                    path = %self.file.path().display(),
                    error = %message,
                    "Local storage is corrupt, starting from empty"
                );
                fs::remove_file(self.file.path())?;
                Ok(())
            }
            Err(e) => Err(e),
            Ok(_) => Ok(()),
        }
    }
}

impl LocalStorage for FileLocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .file
            .load()?
            .and_then(|mut entries| entries.remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.discard_if_corrupt()?;
        self.file.update(Entries::new(), |entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn clear(&self, key: &str) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.discard_if_corrupt()?;
        self.file.update(Entries::new(), |entries| {
            entries.remove(key);
        })
    }
}
