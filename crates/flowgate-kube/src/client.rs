//! Control-plane client implementing the core port.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use flowgate_core::{
    ControlPlaneError, ControlPlanePort, RawByteStream, Workflow, WorkflowFilter, WorkflowList,
};

use crate::config::KubeConfig;
use crate::error::{KubeError, KubeResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url::{pod_log_url, secret_url, workflow_list_url, workflow_url};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default control-plane client using the reqwest HTTP backend.
pub type DefaultKubeClient = KubeClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the cluster control plane.
///
/// Generic over an HTTP backend for testability; use `DefaultKubeClient`
/// in production code. One instance is constructed at process start and
/// shared across requests - it holds no per-request state.
pub struct KubeClient<B: HttpBackend> {
    backend: B,
    base_url: Url,
    group: String,
    version: String,
}

impl DefaultKubeClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &KubeConfig) -> KubeResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| KubeError::Configuration(format!("base url: {err}")))?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self {
            backend,
            base_url,
            group: config.group.clone(),
            version: config.version.clone(),
        })
    }
}

impl<B: HttpBackend> KubeClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(backend: B, base_url: Url, group: &str, version: &str) -> Self {
        Self {
            backend,
            base_url,
            group: group.to_string(),
            version: version.to_string(),
        }
    }
}

/// Wire form of a secret object: values are base64 text as stored.
#[derive(Debug, Deserialize)]
struct SecretObject {
    #[serde(default)]
    data: HashMap<String, String>,
}

#[async_trait]
impl<B: HttpBackend> ControlPlanePort for KubeClient<B> {
    async fn get_workflow(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Workflow, ControlPlaneError> {
        let url = workflow_url(&self.base_url, &self.group, &self.version, namespace, name);
        self.backend
            .get_json(&url)
            .await
            .map_err(ControlPlaneError::from)
    }

    async fn list_workflows(
        &self,
        namespace: &str,
        filter: &WorkflowFilter,
    ) -> Result<WorkflowList, ControlPlaneError> {
        let url = workflow_list_url(
            &self.base_url,
            &self.group,
            &self.version,
            namespace,
            &filter.phases,
        );
        self.backend
            .get_json(&url)
            .await
            .map_err(ControlPlaneError::from)
    }

    async fn get_secret(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<HashMap<String, String>, ControlPlaneError> {
        let url = secret_url(&self.base_url, namespace, name);
        let secret: SecretObject = self
            .backend
            .get_json(&url)
            .await
            .map_err(ControlPlaneError::from)?;
        Ok(secret.data)
    }

    async fn stream_pod_log(
        &self,
        namespace: &str,
        pod: &str,
        container: &str,
        follow: bool,
    ) -> Result<RawByteStream, ControlPlaneError> {
        let url = pod_log_url(&self.base_url, namespace, pod, container, follow);
        self.backend
            .get_stream(&url)
            .await
            .map_err(ControlPlaneError::from)
    }
}
