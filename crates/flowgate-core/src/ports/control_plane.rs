//! Control-plane client port.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Workflow, WorkflowList};
use crate::events::RawByteStream;

/// Errors from control-plane operations.
#[derive(Debug, Error)]
pub enum ControlPlaneError {
    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The control plane answered with a non-success status.
    #[error("control plane request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("control plane transport error: {0}")]
    Transport(String),

    /// The response could not be interpreted as the expected resource.
    #[error("invalid control plane response: {0}")]
    InvalidResponse(String),
}

/// Filter for workflow listings.
///
/// A non-empty phase set is translated by the adapter into a label
/// selector on the workflow phase label.
#[derive(Debug, Clone, Default)]
pub struct WorkflowFilter {
    pub phases: Vec<String>,
}

impl WorkflowFilter {
    pub fn with_phases(phases: Vec<String>) -> Self {
        Self { phases }
    }
}

/// Port trait for the cluster control plane.
///
/// The control plane is a stateless collaborator: one configured client is
/// built at process start and shared across requests. Secret values are
/// returned in their stored base64 text form; decoding is the
/// [`crate::services::CredentialResolver`]'s job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ControlPlanePort: Send + Sync {
    /// Fetch one workflow resource by namespace and name.
    async fn get_workflow(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Workflow, ControlPlaneError>;

    /// List workflow resources in a namespace, optionally filtered by phase.
    async fn list_workflows(
        &self,
        namespace: &str,
        filter: &WorkflowFilter,
    ) -> Result<WorkflowList, ControlPlaneError>;

    /// Fetch a secret object; values are base64 text as stored.
    async fn get_secret(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<HashMap<String, String>, ControlPlaneError>;

    /// Open a live log tail for one container of a pod.
    ///
    /// With `follow` the stream stays open until the pod stops or the
    /// caller drops it; a single backend error terminates it.
    async fn stream_pod_log(
        &self,
        namespace: &str,
        pod: &str,
        container: &str,
        follow: bool,
    ) -> Result<RawByteStream, ControlPlaneError>;
}
