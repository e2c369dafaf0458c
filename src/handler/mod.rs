//! Request handler module
//!
//! A `Slice` turns one request into one response. The router adapts hyper
//! requests onto the configured slice.

pub mod blob_metadata;
pub mod router;

use async_trait::async_trait;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{HeaderMap, Response};
use thiserror::Error;

use crate::http::RequestLineError;
use crate::storage::StorageError;

pub use blob_metadata::BlobMetadataSlice;
pub use router::handle_request;

/// Failure to produce a response
#[derive(Debug, Error)]
pub enum SliceError {
    #[error(transparent)]
    RequestLine(#[from] RequestLineError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Asynchronous request handler
#[async_trait]
pub trait Slice: Send + Sync {
    /// Respond to a request given its start line, headers and body
    async fn response(
        &self,
        line: &str,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Response<Full<Bytes>>, SliceError>;
}
