// Filesystem storage module
// Maps keys to regular files below a root directory

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{Key, Storage, StorageError};

/// Storage reading blobs from files under `root`
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path of `key`, `None` for keys that would escape the root
    fn path(&self, key: &Key) -> Option<PathBuf> {
        if key.parts().is_empty() || key.parts().iter().any(|p| p == "." || p == "..") {
            return None;
        }
        Some(key.parts().iter().fold(self.root.clone(), |path, part| path.join(part)))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn exists(&self, key: &Key) -> Result<bool, StorageError> {
        let Some(path) = self.path(key) else {
            return Ok(false);
        };
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::Io {
                key: key.string(),
                source,
            }),
        }
    }

    async fn size(&self, key: &Key) -> Result<u64, StorageError> {
        let path = self
            .path(key)
            .ok_or_else(|| StorageError::NotFound(key.string()))?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(meta.len()),
            Ok(_) => Err(StorageError::NotFound(key.string())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.string()))
            }
            Err(source) => Err(StorageError::Io {
                key: key.string(),
                source,
            }),
        }
    }
}
