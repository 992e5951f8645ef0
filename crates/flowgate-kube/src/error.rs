//! Error types for control-plane client operations.

use flowgate_core::ControlPlaneError;
use thiserror::Error;

/// Result alias for control-plane client operations.
pub type KubeResult<T> = Result<T, KubeError>;

/// Errors from the control-plane client.
///
/// These carry transport detail; the port boundary maps them into the
/// core's `ControlPlaneError` taxonomy.
#[derive(Debug, Error)]
pub enum KubeError {
    /// The requested resource does not exist (HTTP 404).
    #[error("resource not found: {url}")]
    NotFound { url: String },

    /// The API server answered with a non-success status.
    #[error("api request failed with status {status}: {url}")]
    ApiRequestFailed { status: u16, url: String },

    /// Network-level failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be interpreted.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<KubeError> for ControlPlaneError {
    fn from(err: KubeError) -> Self {
        match err {
            KubeError::NotFound { url } => Self::NotFound(url),
            KubeError::ApiRequestFailed { status, url } => Self::Api {
                status,
                message: url,
            },
            KubeError::Network(cause) => Self::Transport(cause.to_string()),
            KubeError::InvalidResponse { message } => Self::InvalidResponse(message),
            // A bad local configuration means the control plane is
            // unreachable, not that it misbehaved.
            KubeError::Configuration(message) => Self::Transport(message),
        }
    }
}
