//! Workflow resource model.
//!
//! These types mirror the wire form of the workflow custom resources held
//! by the control plane (camelCase JSON), independent of any transport.
//! The gateway only ever reads them - nothing here is created or mutated
//! by this subsystem. Fields outside the typed model are captured into
//! flattened maps so resources relay through the gateway losslessly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─────────────────────────────────────────────────────────────────────────────
// Resource metadata
// ─────────────────────────────────────────────────────────────────────────────

/// Standard object metadata carried by every custom resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    /// Creation time assigned by the control plane. Drives newest-first
    /// ordering of workflow listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
    /// Metadata the gateway does not model (uid, resourceVersion, ...),
    /// carried through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Workflow
// ─────────────────────────────────────────────────────────────────────────────

/// A workflow custom resource: a multi-step computation and its status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: WorkflowStatus,
    /// Top-level fields the gateway does not model (apiVersion, kind,
    /// the full spec), carried through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Workflow {
    /// Look up an execution node by name.
    pub fn node(&self, name: &str) -> Option<&NodeStatus> {
        self.status.nodes.get(name)
    }
}

/// Observed state of a workflow, keyed by execution node name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub nodes: HashMap<String, NodeStatus>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Status of a single execution node (step) within a workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStatus {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<NodeOutputs>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl NodeStatus {
    /// Find a declared output artifact by name.
    pub fn output_artifact(&self, name: &str) -> Option<&Artifact> {
        self.outputs
            .as_ref()
            .and_then(|outputs| outputs.artifacts.iter().find(|a| a.name == name))
    }
}

/// Outputs declared by an execution node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOutputs {
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

/// List form returned by the control plane for workflow queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowList {
    #[serde(default)]
    pub items: Vec<Workflow>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Artifacts
// ─────────────────────────────────────────────────────────────────────────────

/// A named output produced by an execution node.
///
/// The location is discriminated by backend kind; exactly one kind is
/// populated per artifact. Object storage is the only kind today.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3: Option<S3ArtifactSource>,
}

/// Object-store location of an artifact, including the secret references
/// that resolve to its access credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ArtifactSource {
    /// Host (and optional port) of the storage endpoint, without scheme.
    pub endpoint: String,
    pub bucket: String,
    /// Object key within the bucket.
    pub key: String,
    pub access_key_secret: SecretKeySelector,
    pub secret_key_secret: SecretKeySelector,
}

impl S3ArtifactSource {
    /// Download filename: the final path segment of the object key.
    pub fn filename(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

/// Reference to a single key within an externally stored secret object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// Name of the secret object.
    pub name: String,
    /// Key within that object whose value is the base64-encoded credential.
    pub key: String,
}
