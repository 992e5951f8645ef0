use std::time::Duration;

/// Connection settings for the object store client.
///
/// The endpoint itself travels with each request (it comes out of the
/// artifact manifest), so the config only carries what the manifest
/// does not: the URL scheme, the signing region, and socket timeouts.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Scheme used to reach the endpoint. In-cluster stores are
    /// typically plain HTTP.
    pub scheme: String,
    /// Region baked into the SigV4 credential scope. MinIO and
    /// friends accept anything consistent; AWS wants the real one.
    pub region: String,
    /// TCP connect timeout. There is no whole-request timeout since
    /// large artifacts may legitimately take a while to download.
    pub connect_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_owned(),
            region: "us-east-1".to_owned(),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl StoreConfig {
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}
