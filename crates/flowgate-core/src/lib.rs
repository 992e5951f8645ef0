//! Core domain for the flowgate workflow gateway.
//!
//! This crate holds everything that is independent of transport and
//! infrastructure: the workflow resource model, the typed event stream
//! used to bridge push-based backends into cancellable sequences, the
//! port traits the adapters implement, and the services that orchestrate
//! them. No HTTP types and no concrete clients live here.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    Artifact, NodeOutputs, NodeStatus, ObjectMeta, S3ArtifactSource, SecretKeySelector, Workflow,
    WorkflowList, WorkflowStatus,
};
pub use events::{EventSource, EventStream, RawByteStream, StreamError, StreamEvent, Subscription};
pub use ports::{
    ControlPlaneError, ControlPlanePort, CoreError, ObjectLocation, ObjectStoreError,
    ObjectStorePort, StorageCredentials, WorkflowFilter,
};
pub use services::{ArtifactService, CredentialResolver, FetchedArtifact, WorkflowService};

// Silence unused dev-dependency warnings (used by integration-style unit tests)
#[cfg(test)]
use tokio_test as _;
