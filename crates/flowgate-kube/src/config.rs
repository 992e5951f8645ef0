//! Public configuration for the control-plane client.
//!
//! The gateway receives these values already resolved (flags, env,
//! service-account mounts); nothing here discovers anything.

use std::time::Duration;

/// Configuration for the control-plane client.
///
/// # Example
///
/// ```
/// use flowgate_kube::KubeConfig;
///
/// let config = KubeConfig::new()
///     .with_base_url("https://kubernetes.default.svc")
///     .with_token("eyJ...".to_string());
/// ```
#[derive(Debug, Clone)]
pub struct KubeConfig {
    /// Base URL of the cluster API server.
    pub(crate) base_url: String,
    /// Optional bearer token for authentication.
    pub(crate) token: Option<String>,
    /// API group of the workflow custom resource.
    pub(crate) group: String,
    /// API version of the workflow custom resource.
    pub(crate) version: String,
    /// Connection establishment timeout.
    ///
    /// Deliberately not a whole-request timeout: log tails with
    /// `follow=true` stay open indefinitely.
    pub(crate) connect_timeout: Duration,
    /// Accept self-signed API server certificates (development only).
    pub(crate) accept_invalid_certs: bool,
}

impl Default for KubeConfig {
    fn default() -> Self {
        Self {
            // kubectl-proxy style local default
            base_url: "http://127.0.0.1:8001".to_string(),
            token: None,
            group: "argoproj.io".to_string(),
            version: "v1alpha1".to_string(),
            connect_timeout: Duration::from_secs(10),
            accept_invalid_certs: false,
        }
    }
}

impl KubeConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API server base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a bearer token for authentication.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set an optional bearer token.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Set the workflow resource API group and version.
    #[must_use]
    pub fn with_resource(mut self, group: impl Into<String>, version: impl Into<String>) -> Self {
        self.group = group.into();
        self.version = version.into();
        self
    }

    /// Set the connection establishment timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Accept self-signed certificates. Development only.
    #[must_use]
    pub const fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}
