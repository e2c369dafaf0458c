// Application state module
// Shared by every connection: configuration, the serving slice, access-log flag

use std::sync::Arc;

use super::types::Config;
use crate::handler::{BlobMetadataSlice, Slice};
use crate::storage::Storage;

/// Application state
pub struct AppState {
    pub config: Config,
    pub slice: Arc<dyn Slice>,
    pub access_log: bool,
}

impl AppState {
    /// Create `AppState` serving blob metadata from `storage`
    pub fn new(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self::with_slice(config, Arc::new(BlobMetadataSlice::new(storage)))
    }

    pub fn with_slice(config: &Config, slice: Arc<dyn Slice>) -> Self {
        Self {
            config: config.clone(),
            slice,
            access_log: config.logging.access_log,
        }
    }
}
