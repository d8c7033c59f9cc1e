//! `StorageBackend` trait — async key-value interface for persisted records.
//!
//! The session core reads and writes opaque serialized blobs; a backend only
//! decides where they live. Malformed blobs are detected by the session store
//! at parse time, never coerced here.

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend-agnostic key-value storage.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the blob stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous blob.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the blob stored under `key`. Removing a missing key is not an
    /// error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
