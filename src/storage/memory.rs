// In-memory storage module
// Holds blobs in a map, used by tests and the `memory` storage kind

use async_trait::async_trait;
use hyper::body::Bytes;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{Key, Storage, StorageError};

/// Storage backed by a `HashMap`
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    blobs: RwLock<HashMap<Key, Bytes>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `key`, replacing any previous value
    pub async fn save(&self, key: Key, data: impl Into<Bytes>) {
        self.blobs.write().await.insert(key, data.into());
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn exists(&self, key: &Key) -> Result<bool, StorageError> {
        Ok(self.blobs.read().await.contains_key(key))
    }

    async fn size(&self, key: &Key) -> Result<u64, StorageError> {
        self.blobs
            .read()
            .await
            .get(key)
            .map(|data| data.len() as u64)
            .ok_or_else(|| StorageError::NotFound(key.string()))
    }
}
