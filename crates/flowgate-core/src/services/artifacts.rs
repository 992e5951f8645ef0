//! Artifact lookup and retrieval.

use std::sync::Arc;

use bytes::Bytes;

use crate::ports::{
    ControlPlaneError, ControlPlanePort, CoreError, ObjectLocation, ObjectStorePort,
    StorageCredentials,
};
use crate::services::CredentialResolver;

/// A fully retrieved artifact, ready to relay as a download.
#[derive(Debug, Clone)]
pub struct FetchedArtifact {
    /// Final path segment of the object key.
    pub filename: String,
    pub bytes: Bytes,
}

/// Locates an artifact through workflow node outputs, resolves its storage
/// credentials, and fetches the object.
#[derive(Clone)]
pub struct ArtifactService {
    control_plane: Arc<dyn ControlPlanePort>,
    credentials: CredentialResolver,
    object_store: Arc<dyn ObjectStorePort>,
}

impl ArtifactService {
    pub fn new(
        control_plane: Arc<dyn ControlPlanePort>,
        object_store: Arc<dyn ObjectStorePort>,
    ) -> Self {
        let credentials = CredentialResolver::new(Arc::clone(&control_plane));
        Self {
            control_plane,
            credentials,
            object_store,
        }
    }

    /// Fetch one artifact by workflow, node, and artifact name.
    ///
    /// All lookups (workflow, node, artifact, secrets) fail fast with
    /// `NotFound` before any call to storage. The object body is fully
    /// buffered before it is returned, so memory bounds the largest
    /// relayable artifact; callers needing true incremental relay should
    /// treat that as an explicit limitation of this contract.
    pub async fn fetch(
        &self,
        namespace: &str,
        workflow_name: &str,
        node_name: &str,
        artifact_name: &str,
    ) -> Result<FetchedArtifact, CoreError> {
        let workflow = self
            .control_plane
            .get_workflow(namespace, workflow_name)
            .await
            .map_err(|err| match err {
                ControlPlaneError::NotFound(_) => {
                    CoreError::NotFound(format!("workflow {namespace}/{workflow_name}"))
                }
                other => CoreError::ControlPlane(other),
            })?;

        let node = workflow.node(node_name).ok_or_else(|| {
            CoreError::NotFound(format!("node {node_name} in workflow {workflow_name}"))
        })?;
        let artifact = node.output_artifact(artifact_name).ok_or_else(|| {
            CoreError::NotFound(format!("artifact {artifact_name} in node {node_name}"))
        })?;
        let s3 = artifact.s3.as_ref().ok_or_else(|| {
            CoreError::NotFound(format!("artifact {artifact_name} has no storage location"))
        })?;

        // Secrets live in the workflow's own namespace.
        let secret_namespace = if workflow.metadata.namespace.is_empty() {
            namespace
        } else {
            workflow.metadata.namespace.as_str()
        };
        let access_key = self
            .credentials
            .resolve(secret_namespace, &s3.access_key_secret)
            .await?;
        let secret_key = self
            .credentials
            .resolve(secret_namespace, &s3.secret_key_secret)
            .await?;

        let location = ObjectLocation {
            endpoint: s3.endpoint.clone(),
            bucket: s3.bucket.clone(),
            key: s3.key.clone(),
        };
        let credentials = StorageCredentials {
            access_key,
            secret_key,
        };

        let bytes = self
            .object_store
            .get_object(&location, &credentials)
            .await
            .map_err(|err| {
                tracing::error!(
                    target: "flowgate.artifacts",
                    error = %err,
                    bucket = %location.bucket,
                    key = %location.key,
                    "artifact object retrieval failed"
                );
                CoreError::ObjectStore(err)
            })?;

        Ok(FetchedArtifact {
            filename: s3.filename().to_string(),
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Artifact, NodeOutputs, NodeStatus, ObjectMeta, S3ArtifactSource, SecretKeySelector,
        Workflow, WorkflowStatus,
    };
    use crate::ports::control_plane::MockControlPlanePort;
    use crate::ports::object_store::MockObjectStorePort;
    use mockall::predicate::eq;
    use std::collections::HashMap;

    fn workflow_with_artifact() -> Workflow {
        let s3 = S3ArtifactSource {
            endpoint: "s3.local".into(),
            bucket: "b".into(),
            key: "out.txt".into(),
            access_key_secret: SecretKeySelector {
                name: "creds".into(),
                key: "accessKey".into(),
            },
            secret_key_secret: SecretKeySelector {
                name: "creds".into(),
                key: "secretKey".into(),
            },
        };
        let node = NodeStatus {
            name: "n1".into(),
            phase: Some("Succeeded".into()),
            outputs: Some(NodeOutputs {
                artifacts: vec![Artifact {
                    name: "out.txt".into(),
                    s3: Some(s3),
                }],
            }),
            ..NodeStatus::default()
        };
        let mut nodes = HashMap::new();
        nodes.insert("n1".to_string(), node);
        Workflow {
            metadata: ObjectMeta {
                name: "wf".into(),
                namespace: "ns".into(),
                ..ObjectMeta::default()
            },
            status: WorkflowStatus {
                phase: Some("Succeeded".into()),
                nodes,
                ..WorkflowStatus::default()
            },
            ..Workflow::default()
        }
    }

    fn secret_data() -> HashMap<String, String> {
        let mut data = HashMap::new();
        // base64 of ACCESS1 / SECRET1
        data.insert("accessKey".to_string(), "QUNDRVNTMQ==".to_string());
        data.insert("secretKey".to_string(), "U0VDUkVUMQ==".to_string());
        data
    }

    #[tokio::test]
    async fn happy_path_passes_resolved_values_to_storage() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane
            .expect_get_workflow()
            .with(eq("ns"), eq("wf"))
            .returning(|_, _| Ok(workflow_with_artifact()));
        control_plane
            .expect_get_secret()
            .with(eq("ns"), eq("creds"))
            .times(2)
            .returning(|_, _| Ok(secret_data()));

        let mut object_store = MockObjectStorePort::new();
        object_store
            .expect_get_object()
            .withf(|location, credentials| {
                location
                    == &ObjectLocation {
                        endpoint: "s3.local".into(),
                        bucket: "b".into(),
                        key: "out.txt".into(),
                    }
                    && credentials
                        == &StorageCredentials {
                            access_key: "ACCESS1".into(),
                            secret_key: "SECRET1".into(),
                        }
            })
            .times(1)
            .returning(|_, _| Ok(Bytes::from_static(b"artifact body")));

        let service = ArtifactService::new(Arc::new(control_plane), Arc::new(object_store));
        let fetched = service.fetch("ns", "wf", "n1", "out.txt").await.unwrap();
        assert_eq!(fetched.filename, "out.txt");
        assert_eq!(&fetched.bytes[..], b"artifact body");
    }

    #[tokio::test]
    async fn unknown_artifact_fails_before_any_secret_or_storage_call() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane
            .expect_get_workflow()
            .returning(|_, _| Ok(workflow_with_artifact()));
        control_plane.expect_get_secret().times(0);

        let mut object_store = MockObjectStorePort::new();
        object_store.expect_get_object().times(0);

        let service = ArtifactService::new(Arc::new(control_plane), Arc::new(object_store));
        let err = service.fetch("ns", "wf", "n1", "other.txt").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unknown_node_fails_before_any_secret_or_storage_call() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane
            .expect_get_workflow()
            .returning(|_, _| Ok(workflow_with_artifact()));
        control_plane.expect_get_secret().times(0);

        let mut object_store = MockObjectStorePort::new();
        object_store.expect_get_object().times(0);

        let service = ArtifactService::new(Arc::new(control_plane), Arc::new(object_store));
        let err = service.fetch("ns", "wf", "missing", "out.txt").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn storage_failure_surfaces_as_object_store_error() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane
            .expect_get_workflow()
            .returning(|_, _| Ok(workflow_with_artifact()));
        control_plane
            .expect_get_secret()
            .returning(|_, _| Ok(secret_data()));

        let mut object_store = MockObjectStorePort::new();
        object_store.expect_get_object().returning(|_, _| {
            Err(crate::ports::ObjectStoreError::Api {
                status: 503,
                message: "slow down".into(),
            })
        });

        let service = ArtifactService::new(Arc::new(control_plane), Arc::new(object_store));
        let err = service.fetch("ns", "wf", "n1", "out.txt").await.unwrap_err();
        assert!(matches!(err, CoreError::ObjectStore(_)));
    }
}
