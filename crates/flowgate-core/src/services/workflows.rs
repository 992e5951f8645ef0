//! Workflow queries and live step log sessions.

use std::sync::Arc;

use crate::domain::{Workflow, WorkflowList};
use crate::events::EventSource;
use crate::ports::{ControlPlaneError, ControlPlanePort, CoreError, WorkflowFilter};

/// Container whose log a step session tails.
const MAIN_CONTAINER: &str = "main";

/// Read-only queries over workflow resources plus live log adaptation.
#[derive(Clone)]
pub struct WorkflowService {
    control_plane: Arc<dyn ControlPlanePort>,
}

impl WorkflowService {
    pub fn new(control_plane: Arc<dyn ControlPlanePort>) -> Self {
        Self { control_plane }
    }

    /// List workflows, newest first by creation timestamp. Workflows
    /// without a timestamp sort last.
    pub async fn list(
        &self,
        namespace: &str,
        phases: Vec<String>,
    ) -> Result<WorkflowList, CoreError> {
        let filter = WorkflowFilter::with_phases(phases);
        let mut list = self.control_plane.list_workflows(namespace, &filter).await?;
        list.items.sort_by(|a, b| {
            b.metadata
                .creation_timestamp
                .cmp(&a.metadata.creation_timestamp)
        });
        Ok(list)
    }

    /// Fetch one workflow resource.
    pub async fn get(&self, namespace: &str, name: &str) -> Result<Workflow, CoreError> {
        self.control_plane
            .get_workflow(namespace, name)
            .await
            .map_err(|err| match err {
                ControlPlaneError::NotFound(_) => {
                    CoreError::NotFound(format!("workflow {namespace}/{name}"))
                }
                other => CoreError::ControlPlane(other),
            })
    }

    /// Open a live log session for a step's main container.
    ///
    /// Failures here (pod missing, control plane unreachable) surface
    /// before any streaming begins; once the session is open, a backend
    /// error terminates it without retry.
    pub async fn stream_step_logs(
        &self,
        namespace: &str,
        pod: &str,
    ) -> Result<EventSource<String>, CoreError> {
        let raw = self
            .control_plane
            .stream_pod_log(namespace, pod, MAIN_CONTAINER, true)
            .await
            .map_err(|err| match err {
                ControlPlaneError::NotFound(_) => {
                    CoreError::NotFound(format!("pod {namespace}/{pod}"))
                }
                other => CoreError::ControlPlane(other),
            })?;
        Ok(EventSource::adapt_text(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ObjectMeta, WorkflowStatus};
    use crate::events::{StreamError, StreamEvent};
    use crate::ports::control_plane::MockControlPlanePort;
    use bytes::Bytes;
    use chrono::{TimeZone, Utc};
    use futures_util::{StreamExt, stream};

    fn workflow_named(name: &str, day: Option<u32>) -> Workflow {
        Workflow {
            metadata: ObjectMeta {
                name: name.into(),
                namespace: "ns".into(),
                creation_timestamp: day
                    .map(|d| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap()),
                ..ObjectMeta::default()
            },
            ..Workflow::default()
        }
    }

    #[tokio::test]
    async fn list_sorts_newest_first_with_missing_timestamps_last() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane.expect_list_workflows().returning(|_, _| {
            Ok(WorkflowList {
                items: vec![
                    workflow_named("old", Some(1)),
                    workflow_named("undated", None),
                    workflow_named("new", Some(20)),
                ],
            })
        });

        let service = WorkflowService::new(Arc::new(control_plane));
        let list = service.list("ns", Vec::new()).await.unwrap();
        let names: Vec<_> = list.items.iter().map(|w| w.metadata.name.as_str()).collect();
        assert_eq!(names, vec!["new", "old", "undated"]);
    }

    #[tokio::test]
    async fn list_passes_phase_filter_through() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane
            .expect_list_workflows()
            .withf(|_, filter| filter.phases == vec!["Running".to_string()])
            .returning(|_, _| Ok(WorkflowList::default()));

        let service = WorkflowService::new(Arc::new(control_plane));
        service.list("ns", vec!["Running".into()]).await.unwrap();
    }

    #[tokio::test]
    async fn missing_pod_fails_before_streaming() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane
            .expect_stream_pod_log()
            .returning(|_, pod, _, _| Err(ControlPlaneError::NotFound(pod.to_string())));

        let service = WorkflowService::new(Arc::new(control_plane));
        let err = service.stream_step_logs("ns", "pod-1").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn log_session_streams_decoded_chunks() {
        let mut control_plane = MockControlPlanePort::new();
        control_plane
            .expect_stream_pod_log()
            .withf(|ns, pod, container, follow| {
                ns == "ns" && pod == "pod-1" && container == "main" && *follow
            })
            .returning(|_, _, _, _| {
                let raw: crate::events::RawByteStream = Box::pin(stream::iter(vec![
                    Ok(Bytes::from_static(b"line one\n")),
                    Err(StreamError::new("tail dropped")),
                ]));
                Ok(raw)
            });

        let service = WorkflowService::new(Arc::new(control_plane));
        let source = service.stream_step_logs("ns", "pod-1").await.unwrap();
        let (mut events, _subscription) = source.subscribe();

        assert_eq!(
            events.next().await,
            Some(StreamEvent::Data("line one\n".into()))
        );
        assert!(matches!(events.next().await, Some(StreamEvent::Error(_))));
        assert!(events.next().await.is_none());
    }
}
