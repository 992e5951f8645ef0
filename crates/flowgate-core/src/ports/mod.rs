//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from infrastructure: the
//! cluster control plane holding workflow resources and secrets, and the
//! object store holding artifacts. They use only domain types; concrete
//! clients live in the adapter crates.

pub mod control_plane;
pub mod object_store;

use thiserror::Error;

pub use control_plane::{ControlPlaneError, ControlPlanePort, WorkflowFilter};
pub use object_store::{ObjectLocation, ObjectStoreError, ObjectStorePort, StorageCredentials};

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own surfaces (HTTP status codes, CLI exit
/// codes). Backend details are preserved here; redaction of anything
/// client-visible happens at the adapter boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A workflow, node, artifact, secret, or secret key is missing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Secret material could not be decoded into a usable credential.
    #[error("credential decode failed: {0}")]
    CredentialDecode(String),

    /// Control-plane request failed.
    #[error(transparent)]
    ControlPlane(#[from] ControlPlaneError),

    /// Object-store request failed.
    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),

    /// Unexpected condition.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether this error means a looked-up resource does not exist.
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::ControlPlane(ControlPlaneError::NotFound(_))
                | Self::ObjectStore(ObjectStoreError::NotFound(_))
        )
    }
}
