//! Credential resolution from externally stored secrets.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::domain::SecretKeySelector;
use crate::ports::{ControlPlaneError, ControlPlanePort, CoreError};

/// Resolves a secret reference into a usable credential string.
///
/// Every call re-fetches the secret object: rotation is observed on next
/// use, with no stale-credential window beyond the in-flight request.
#[derive(Clone)]
pub struct CredentialResolver {
    control_plane: Arc<dyn ControlPlanePort>,
}

impl CredentialResolver {
    pub fn new(control_plane: Arc<dyn ControlPlanePort>) -> Self {
        Self { control_plane }
    }

    /// Look up `selector.key` in the named secret object and decode the
    /// stored base64 text into a credential string.
    ///
    /// A missing secret object or key is `NotFound`; undecodable material
    /// is `CredentialDecode`. Neither is retried.
    pub async fn resolve(
        &self,
        namespace: &str,
        selector: &SecretKeySelector,
    ) -> Result<String, CoreError> {
        let data = self
            .control_plane
            .get_secret(namespace, &selector.name)
            .await
            .map_err(|err| match err {
                ControlPlaneError::NotFound(_) => {
                    CoreError::NotFound(format!("secret {}/{}", namespace, selector.name))
                }
                other => CoreError::ControlPlane(other),
            })?;

        let encoded = data.get(&selector.key).ok_or_else(|| {
            CoreError::NotFound(format!(
                "key {} in secret {}/{}",
                selector.key, namespace, selector.name
            ))
        })?;

        let raw = BASE64
            .decode(encoded.trim())
            .map_err(|err| CoreError::CredentialDecode(err.to_string()))?;
        String::from_utf8(raw).map_err(|err| CoreError::CredentialDecode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::control_plane::MockControlPlanePort;
    use mockall::predicate::eq;
    use std::collections::HashMap;

    fn selector() -> SecretKeySelector {
        SecretKeySelector {
            name: "creds".into(),
            key: "accessKey".into(),
        }
    }

    #[tokio::test]
    async fn decodes_base64_secret_value() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane
            .expect_get_secret()
            .with(eq("default"), eq("creds"))
            .returning(|_, _| {
                let mut data = HashMap::new();
                data.insert("accessKey".to_string(), "QUJD".to_string());
                Ok(data)
            });

        let resolver = CredentialResolver::new(Arc::new(control_plane));
        let credential = resolver.resolve("default", &selector()).await.unwrap();
        assert_eq!(credential, "ABC");
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane
            .expect_get_secret()
            .returning(|_, _| Ok(HashMap::new()));

        let resolver = CredentialResolver::new(Arc::new(control_plane));
        let err = resolver.resolve("default", &selector()).await.unwrap_err();
        assert!(err.is_not_found(), "expected NotFound, got {err}");
    }

    #[tokio::test]
    async fn missing_secret_object_is_not_found() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane
            .expect_get_secret()
            .returning(|_, name| Err(ControlPlaneError::NotFound(name.to_string())));

        let resolver = CredentialResolver::new(Arc::new(control_plane));
        let err = resolver.resolve("default", &selector()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn invalid_base64_is_a_decode_error() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane.expect_get_secret().returning(|_, _| {
            let mut data = HashMap::new();
            data.insert("accessKey".to_string(), "not base64!!".to_string());
            Ok(data)
        });

        let resolver = CredentialResolver::new(Arc::new(control_plane));
        let err = resolver.resolve("default", &selector()).await.unwrap_err();
        assert!(matches!(err, CoreError::CredentialDecode(_)));
    }
}
