//! Core services - the gateway's business logic layer.
//!
//! Services orchestrate between ports and domain logic. They are pure
//! orchestrators: no transport, no concrete clients, no retry policy
//! (retries, if wanted, belong to callers).

mod artifacts;
mod credentials;
mod workflows;

pub use artifacts::{ArtifactService, FetchedArtifact};
pub use credentials::CredentialResolver;
pub use workflows::WorkflowService;
