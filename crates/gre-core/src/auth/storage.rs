//! Durable key-value storage abstraction backing the session store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::Result;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USER_DATA_KEY: &str = "user_data";
pub const REMEMBER_ME_KEY: &str = "remember_me";
pub const REMEMBERED_EMAIL_KEY: &str = "remembered_email";

/// Every key the session store owns; all of them are cleared on logout.
pub const AUTH_KEYS: &[&str] = &[
    ACCESS_TOKEN_KEY,
    USER_DATA_KEY,
    REMEMBER_ME_KEY,
    REMEMBERED_EMAIL_KEY,
];

/// String key-value storage that survives restarts.
///
/// Each call is atomic on its own; callers never hold a transaction across
/// calls.
pub trait LocalStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a single key. Removing an absent key is not an error.
    fn clear(&self, key: &str) -> Result<()>;
}

/// In-process storage, used for tests and for runs that should leave no trace.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Mutex::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
