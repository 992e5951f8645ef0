//! URL construction helpers for the cluster API.
//!
//! Pure functions so every endpoint path is built (and tested) in one
//! place. Workflow custom resources live under their API group; secrets
//! and pod logs live under the core `api/v1` tree.

use url::Url;

/// Append `suffix` to the base URL's path, preserving any path prefix the
/// base already carries (e.g. a proxy mount point).
fn with_path(base: &Url, suffix: &str) -> Url {
    let mut url = base.clone();
    let base_path = url.path().trim_end_matches('/');
    url.set_path(&format!("{base_path}/{suffix}"));
    url
}

/// URL of one workflow custom resource.
pub fn workflow_url(base: &Url, group: &str, version: &str, namespace: &str, name: &str) -> Url {
    with_path(
        base,
        &format!("apis/{group}/{version}/namespaces/{namespace}/workflows/{name}"),
    )
}

/// URL of the workflow collection, with an optional phase label selector.
pub fn workflow_list_url(base: &Url, group: &str, version: &str, namespace: &str, phases: &[String]) -> Url {
    let mut url = with_path(
        base,
        &format!("apis/{group}/{version}/namespaces/{namespace}/workflows"),
    );
    if !phases.is_empty() {
        let selector = format!("workflows.{group}/phase in ({})", phases.join(","));
        url.query_pairs_mut().append_pair("labelSelector", &selector);
    }
    url
}

/// URL of one secret object.
pub fn secret_url(base: &Url, namespace: &str, name: &str) -> Url {
    with_path(base, &format!("api/v1/namespaces/{namespace}/secrets/{name}"))
}

/// URL of a pod's container log, optionally following.
pub fn pod_log_url(base: &Url, namespace: &str, pod: &str, container: &str, follow: bool) -> Url {
    let mut url = with_path(base, &format!("api/v1/namespaces/{namespace}/pods/{pod}/log"));
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("container", container);
        if follow {
            pairs.append_pair("follow", "true");
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://127.0.0.1:8001").unwrap()
    }

    #[test]
    fn workflow_url_uses_group_and_version() {
        let url = workflow_url(&base(), "argoproj.io", "v1alpha1", "default", "wf-1");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8001/apis/argoproj.io/v1alpha1/namespaces/default/workflows/wf-1"
        );
    }

    #[test]
    fn list_url_without_phases_has_no_selector() {
        let url = workflow_list_url(&base(), "argoproj.io", "v1alpha1", "default", &[]);
        assert!(url.query().is_none());
    }

    #[test]
    fn list_url_builds_phase_label_selector() {
        let phases = vec!["Running".to_string(), "Succeeded".to_string()];
        let url = workflow_list_url(&base(), "argoproj.io", "v1alpha1", "default", &phases);
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            query,
            vec![(
                "labelSelector".to_string(),
                "workflows.argoproj.io/phase in (Running,Succeeded)".to_string()
            )]
        );
    }

    #[test]
    fn pod_log_url_carries_container_and_follow() {
        let url = pod_log_url(&base(), "default", "pod-1", "main", true);
        assert_eq!(url.path(), "/api/v1/namespaces/default/pods/pod-1/log");
        assert_eq!(url.query(), Some("container=main&follow=true"));
    }

    #[test]
    fn base_path_prefix_is_preserved() {
        let proxied = Url::parse("http://gateway.local/cluster").unwrap();
        let url = secret_url(&proxied, "default", "creds");
        assert_eq!(url.path(), "/cluster/api/v1/namespaces/default/secrets/creds");
    }
}
