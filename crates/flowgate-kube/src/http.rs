//! HTTP backend abstraction for the cluster API.
//!
//! Trait-based backend so the client can be exercised against canned
//! responses. The production implementation uses reqwest. Unlike a
//! generic API client there is no retry logic anywhere in this crate: a
//! failed request fails the operation, and a broken log tail terminates
//! the session.

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use url::Url;

use flowgate_core::{RawByteStream, StreamError};

use crate::config::KubeConfig;
use crate::error::{KubeError, KubeResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// HTTP backend the client runs on.
///
/// This is an implementation detail - external code talks to the client
/// through the `ControlPlanePort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> KubeResult<T>;

    /// Open a long-lived byte stream (log tail) at a URL.
    async fn get_stream(&self, url: &Url) -> KubeResult<RawByteStream>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// Built without a whole-request timeout so that `follow=true` log tails
/// stay open; only connection establishment is bounded.
pub struct ReqwestBackend {
    client: reqwest::Client,
    token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend from the client configuration.
    pub fn new(config: &KubeConfig) -> KubeResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|err| KubeError::Configuration(err.to_string()))?;

        Ok(Self {
            client,
            token: config.token.clone(),
        })
    }

    /// Build a request with optional bearer authentication.
    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url.as_str());
        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    async fn checked_response(&self, url: &Url) -> KubeResult<reqwest::Response> {
        let response = self.build_request(url).send().await?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Err(KubeError::NotFound {
                url: url.path().to_string(),
            });
        }
        if !status.is_success() {
            return Err(KubeError::ApiRequestFailed {
                status: status.as_u16(),
                url: url.path().to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> KubeResult<T> {
        let response = self.checked_response(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn get_stream(&self, url: &Url) -> KubeResult<RawByteStream> {
        let response = self.checked_response(url).await?;
        tracing::debug!(target: "flowgate.kube", path = %url.path(), "opened log tail");
        let stream = response
            .bytes_stream()
            .map(|item| item.map_err(|err| StreamError::new(err.to_string())));
        Ok(Box::pin(stream))
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
