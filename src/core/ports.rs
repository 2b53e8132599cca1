// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe the durable medium as a flat string-keyed byte store.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.
//
// Testing guidance
// - Use the in memory storage for tests and local development.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Whole-value key-value storage. A write replaces the value under `key` entirely; there is no
/// compare-and-swap, so concurrent writers are last-write-wins.
pub trait KeyValueStorage: Send + Sync {
    /// `Ok(None)` when nothing has been written under `key` yet.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}
