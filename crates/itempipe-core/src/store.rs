//! Object storage seam.
//!
//! The handler only needs to write one object per request. [`ObjectStore`]
//! captures that; [`S3ObjectStore`] is the production implementation over the
//! shared S3 client. Failures are returned as raw [`BackendFailure`]s so the
//! caller decides where classification happens.

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;

use crate::client::s3_client;
use crate::config::AppConfig;
use crate::error::BackendFailure;

/// A single object write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectRequest {
    /// Target bucket.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Object bytes.
    pub body: Vec<u8>,
    /// `Content-Type` stored with the object.
    pub content_type: String,
}

/// Write access to object storage.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store one object, overwriting any existing object at the same key.
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), BackendFailure>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for Arc<T> {
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), BackendFailure> {
        (**self).put_object(request).await
    }
}

/// [`ObjectStore`] backed by `aws-sdk-s3`.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Arc<aws_sdk_s3::Client>,
}

impl S3ObjectStore {
    /// Wrap an existing client.
    #[must_use]
    pub fn new(client: Arc<aws_sdk_s3::Client>) -> Self {
        Self { client }
    }

    /// Use the process-wide client, building it from `config` if needed.
    pub async fn from_config(config: &AppConfig) -> Self {
        Self::new(s3_client(config).await)
    }

    /// The underlying client.
    #[must_use]
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), BackendFailure> {
        self.client
            .put_object()
            .bucket(request.bucket)
            .key(request.key)
            .content_type(request.content_type)
            .body(ByteStream::from(request.body))
            .send()
            .await
            .map(|_| ())
            .map_err(|err| BackendFailure::from(&err))
    }
}

/// In-memory store that records writes, for tests.
#[cfg(any(test, feature = "test-util"))]
pub mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{ObjectStore, PutObjectRequest};
    use crate::error::BackendFailure;

    /// Records every write; optionally fails all of them.
    #[derive(Debug, Default)]
    pub struct RecordingStore {
        puts: Mutex<Vec<PutObjectRequest>>,
        failure: Option<BackendFailure>,
    }

    impl RecordingStore {
        /// A store that accepts every write.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A store that rejects every write with `failure`.
        ///
        /// Rejected writes are still recorded as attempts.
        #[must_use]
        pub fn failing(failure: BackendFailure) -> Self {
            Self {
                puts: Mutex::default(),
                failure: Some(failure),
            }
        }

        /// All write attempts so far.
        #[must_use]
        pub fn puts(&self) -> Vec<PutObjectRequest> {
            self.puts.lock().map(|p| p.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl ObjectStore for RecordingStore {
        async fn put_object(&self, request: PutObjectRequest) -> Result<(), BackendFailure> {
            if let Ok(mut puts) = self.puts.lock() {
                puts.push(request);
            }
            match &self.failure {
                Some(failure) => Err(failure.clone()),
                None => Ok(()),
            }
        }
    }
}
