//! Blob storage module
//!
//! Defines the storage key, the read-only `Storage` interface the handlers
//! consume, and the path to key transforms.

mod fs;
mod key;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use fs::FileStorage;
pub use key::{Key, KeyFromPath, PathToKey};
pub use memory::InMemoryStorage;

/// Storage lookup failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("key {0} not found")]
    NotFound(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only view of a key/value blob store
#[async_trait]
pub trait Storage: Send + Sync {
    /// Whether a value is stored under `key`
    async fn exists(&self, key: &Key) -> Result<bool, StorageError>;

    /// Size in bytes of the value under `key`
    ///
    /// Only meaningful once `exists` returned `true` for the same key.
    async fn size(&self, key: &Key) -> Result<u64, StorageError>;
}
