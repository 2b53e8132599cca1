// In memory implementation of the KeyValueStorage port.
//
// Purpose
// - Support entry store tests and local development without touching the disk.
//
// Responsibilities
// - Hold raw values per key.
// - Simulate an unavailable backend through toggle_offline.

use crate::core::ports::{KeyValueStorage, StorageError};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct InMemoryStorage {
    values: RwLock<HashMap<String, Vec<u8>>>,
    is_offline: bool,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Seeds arbitrary bytes under `key`, bypassing the offline switch.
    pub fn put_raw(&self, key: &str, value: impl Into<Vec<u8>>) {
        self.values
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), value.into());
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.values
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}

impl KeyValueStorage for InMemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        if self.is_offline {
            return Err(StorageError::Backend("Storage offline".into()));
        }
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if self.is_offline {
            return Err(StorageError::Backend("Storage offline".into()));
        }
        self.put_raw(key, value);
        Ok(())
    }
}
