//! Object-store client port.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Where an object lives: endpoint host, bucket, and key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    /// Host (and optional port) of the storage endpoint, without scheme.
    pub endpoint: String,
    pub bucket: String,
    pub key: String,
}

/// Credentials resolved for a single request. Never cached by the core;
/// every fetch re-resolves them from the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageCredentials {
    pub access_key: String,
    pub secret_key: String,
}

/// Errors from object-store operations.
#[derive(Debug, Error)]
pub enum ObjectStoreError {
    /// The object (or bucket) does not exist.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The store answered with a non-success status.
    #[error("object store request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("object store transport error: {0}")]
    Transport(String),
}

/// Port trait for S3-compatible object storage.
///
/// Requests use path-style addressing and a fixed signing scheme; the
/// adapter is scoped per call to the location's endpoint, so one client
/// serves artifacts from any number of stores.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorePort: Send + Sync {
    /// Fetch one object in full.
    ///
    /// The whole body is buffered before it is returned; large-object
    /// backpressure is bounded by available memory.
    async fn get_object(
        &self,
        location: &ObjectLocation,
        credentials: &StorageCredentials,
    ) -> Result<Bytes, ObjectStoreError>;
}
