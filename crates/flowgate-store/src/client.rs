use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use flowgate_core::ports::object_store::{
    ObjectLocation, ObjectStoreError, ObjectStorePort, StorageCredentials,
};
use reqwest::StatusCode;

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::sign::{self, GetRequest, SigningContext};

const SERVICE: &str = "s3";

/// S3-compatible object store client.
///
/// One client serves any number of endpoints: the host comes from the
/// [`ObjectLocation`] and the credentials arrive with every call, so no
/// per-store state is held here beyond the connection pool.
pub struct S3ObjectStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl S3ObjectStore {
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        if config.scheme != "http" && config.scheme != "https" {
            return Err(StoreError::Configuration(format!(
                "unsupported scheme '{}'",
                config.scheme
            )));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|err| StoreError::Configuration(err.to_string()))?;
        Ok(Self { client, config })
    }
}

/// Path-style object URI: `/{bucket}/{key}`, each key segment escaped,
/// slashes inside the key preserved.
fn object_path(bucket: &str, key: &str) -> String {
    let encoded_key: Vec<String> = key.split('/').map(sign::encode_path_segment).collect();
    format!(
        "/{}/{}",
        sign::encode_path_segment(bucket),
        encoded_key.join("/")
    )
}

#[async_trait]
impl ObjectStorePort for S3ObjectStore {
    async fn get_object(
        &self,
        location: &ObjectLocation,
        credentials: &StorageCredentials,
    ) -> Result<Bytes, ObjectStoreError> {
        let path = object_path(&location.bucket, &location.key);
        let url = format!("{}://{}{path}", self.config.scheme, location.endpoint);

        let signed_headers = sign::sign_get(
            &GetRequest {
                host: &location.endpoint,
                path: &path,
                extra_headers: &[],
            },
            &SigningContext {
                access_key: &credentials.access_key,
                secret_key: &credentials.secret_key,
                region: &self.config.region,
                service: SERVICE,
            },
            Utc::now(),
        );

        let mut request = self.client.get(&url);
        for (name, value) in signed_headers {
            request = request.header(name, value);
        }

        tracing::debug!(target: "flowgate.store", %url, "fetching object");
        let response = request
            .send()
            .await
            .map_err(|err| ObjectStoreError::Transport(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ObjectStoreError::NotFound(format!(
                "{}/{}",
                location.bucket, location.key
            )));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ObjectStoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .bytes()
            .await
            .map_err(|err| ObjectStoreError::Transport(err.to_string()))
    }
}
