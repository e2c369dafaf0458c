//! Blob metadata handler
//!
//! Answers with the name and length of a stored blob, never its content.

use async_trait::async_trait;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{HeaderMap, Response};
use std::sync::Arc;

use super::{Slice, SliceError};
use crate::http::{self, RequestLine};
use crate::storage::{KeyFromPath, PathToKey, Storage};

/// Slice serving metadata of binary blobs
pub struct BlobMetadataSlice {
    storage: Arc<dyn Storage>,
    transform: Box<dyn PathToKey>,
}

impl BlobMetadataSlice {
    /// Slice addressing keys by request path
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_transform(storage, KeyFromPath)
    }

    /// Slice with a custom path to key transform
    pub fn with_transform(storage: Arc<dyn Storage>, transform: impl PathToKey + 'static) -> Self {
        Self {
            storage,
            transform: Box::new(transform),
        }
    }
}

#[async_trait]
impl Slice for BlobMetadataSlice {
    async fn response(
        &self,
        line: &str,
        _headers: &HeaderMap,
        _body: Bytes,
    ) -> Result<Response<Full<Bytes>>, SliceError> {
        let line = RequestLine::parse(line)?;
        let path = line.decoded_path()?;
        let key = self.transform.key(&path);

        // size is undefined for absent keys, so it waits on exists
        if !self.storage.exists(&key).await? {
            return Ok(http::build_not_found_response(format!(
                "Key {} not found",
                key.string()
            )));
        }
        let size = self.storage.size(&key).await?;
        Ok(http::build_metadata_response(&path, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryStorage, Key, StorageError};
    use http_body_util::BodyExt;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn body_of(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    async fn respond(slice: &BlobMetadataSlice, line: &str) -> Response<Full<Bytes>> {
        slice
            .response(line, &HeaderMap::new(), Bytes::new())
            .await
            .unwrap()
    }

    /// Storage that counts calls and fails or answers as configured
    #[derive(Default)]
    struct CountingStorage {
        fail_exists: bool,
        exists_calls: AtomicUsize,
        size_calls: AtomicUsize,
    }

    #[async_trait]
    impl Storage for CountingStorage {
        async fn exists(&self, _key: &Key) -> Result<bool, StorageError> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_exists {
                return Err(StorageError::Unavailable("offline".to_string()));
            }
            Ok(false)
        }

        async fn size(&self, _key: &Key) -> Result<u64, StorageError> {
            self.size_calls.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }
    }

    #[tokio::test]
    async fn test_existing_blob_metadata() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.save(Key::new("K"), vec![1u8; 42]).await;
        let slice = BlobMetadataSlice::new(storage);

        let response = respond(&slice, "HEAD /K HTTP/1.1").await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Length"], "42");
        assert_eq!(
            response.headers()["Content-Disposition"],
            "attachment; filename=\"K\""
        );
        assert!(body_of(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_blob_not_found() {
        let slice = BlobMetadataSlice::new(Arc::new(InMemoryStorage::new()));

        let response = respond(&slice, "GET /K HTTP/1.1").await;
        assert_eq!(response.status(), 404);
        assert_eq!(&body_of(response).await[..], b"Key K not found");
    }

    #[tokio::test]
    async fn test_nested_path_and_query() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.save(Key::new("repo/pkg/lib.jar"), vec![0u8; 7]).await;
        let slice = BlobMetadataSlice::new(storage);

        let response = respond(&slice, "GET /repo/pkg/lib.jar?meta=1 HTTP/1.1").await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Length"], "7");
        assert_eq!(
            response.headers()["Content-Disposition"],
            "attachment; filename=\"lib.jar\""
        );
    }

    #[tokio::test]
    async fn test_encoded_path_addresses_decoded_key() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.save(Key::new("dir/my file.bin"), vec![0u8; 42]).await;
        let slice = BlobMetadataSlice::new(storage);

        let response = respond(&slice, "HEAD /dir/my%20file.bin HTTP/1.1").await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["Content-Length"], "42");
        assert_eq!(
            response.headers()["Content-Disposition"],
            "attachment; filename=\"my file.bin\""
        );

        let response = respond(&slice, "HEAD /dir/other%20file.bin HTTP/1.1").await;
        assert_eq!(
            &body_of(response).await[..],
            b"Key dir/other file.bin not found"
        );
    }

    #[tokio::test]
    async fn test_undecodable_path_rejected() {
        let slice = BlobMetadataSlice::new(Arc::new(InMemoryStorage::new()));
        let result = slice
            .response("HEAD /bad%FF HTTP/1.1", &HeaderMap::new(), Bytes::new())
            .await;
        assert!(matches!(result, Err(SliceError::RequestLine(_))));
    }

    #[tokio::test]
    async fn test_custom_transform() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.save(Key::new("blobs/K"), vec![0u8; 3]).await;
        let slice = BlobMetadataSlice::with_transform(storage, |path: &str| {
            Key::new(&format!("blobs/{path}"))
        });

        let response = respond(&slice, "GET /K HTTP/1.1").await;
        assert_eq!(response.headers()["Content-Length"], "3");

        let response = respond(&slice, "GET /other HTTP/1.1").await;
        assert_eq!(&body_of(response).await[..], b"Key blobs/other not found");
    }

    #[tokio::test]
    async fn test_repeated_requests_identical() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.save(Key::new("K"), vec![0u8; 42]).await;
        let slice = BlobMetadataSlice::new(storage);

        let first = respond(&slice, "GET /K HTTP/1.1").await;
        let second = respond(&slice, "GET /K HTTP/1.1").await;
        assert_eq!(first.status(), second.status());
        assert_eq!(first.headers(), second.headers());
        assert_eq!(body_of(first).await, body_of(second).await);
    }

    #[tokio::test]
    async fn test_size_not_queried_for_missing_key() {
        let storage = Arc::new(CountingStorage::default());
        let slice = BlobMetadataSlice::new(storage.clone());

        let response = respond(&slice, "GET /missing HTTP/1.1").await;
        assert_eq!(response.status(), 404);
        assert_eq!(storage.exists_calls.load(Ordering::SeqCst), 1);
        assert_eq!(storage.size_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let storage = Arc::new(CountingStorage {
            fail_exists: true,
            ..CountingStorage::default()
        });
        let slice = BlobMetadataSlice::new(storage.clone());

        let result = slice
            .response("GET /K HTTP/1.1", &HeaderMap::new(), Bytes::new())
            .await;
        assert!(matches!(
            result,
            Err(SliceError::Storage(StorageError::Unavailable(_)))
        ));
        assert_eq!(storage.size_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_request_line() {
        let slice = BlobMetadataSlice::new(Arc::new(InMemoryStorage::new()));
        let result = slice
            .response("garbage", &HeaderMap::new(), Bytes::new())
            .await;
        assert!(matches!(result, Err(SliceError::RequestLine(_))));
    }
}
