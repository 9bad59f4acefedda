//! Storage trait abstraction.

use serde::{de::DeserializeOwned, Serialize};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be used by this backend
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Key-value storage for string records.
///
/// This trait allows different storage backends to be plugged in. Every
/// operation is synchronous and runs to completion before returning.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Read a JSON value stored under `key`.
pub fn read_json<T: DeserializeOwned>(store: &(impl KeyValueStore + ?Sized), key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Store `value` as JSON under `key`.
pub fn write_json<T: Serialize>(store: &mut (impl KeyValueStore + ?Sized), key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}
