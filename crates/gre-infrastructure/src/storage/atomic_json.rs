//! Atomic JSON file operations.
//!
//! Writes go to a temporary sibling, are fsynced, then renamed over the
//! target. Read-modify-write cycles hold an exclusive lock file.

use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use gre_core::{GreError, Result};
use serde::{Serialize, de::DeserializeOwned};

/// A handle to a JSON file that is only ever replaced atomically.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file. A missing or blank file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Replaces the file contents atomically.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Locked read-modify-write. `default_value` seeds a missing file.
    pub fn update<F, R>(&self, default_value: T, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        let result = f(&mut data);
        self.save(&data)?;

        Ok(result)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| GreError::storage("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| GreError::storage("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

/// Exclusive lock guard; the lock file is removed on drop.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| GreError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}
