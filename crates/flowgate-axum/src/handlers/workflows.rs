//! Workflow list and get handlers.

use axum::Json;
use axum::extract::{Path, RawQuery, State};
use flowgate_core::{Workflow, WorkflowList};

use crate::error::HttpError;
use crate::state::AppState;

/// List workflows in the gateway's namespace, newest first.
///
/// The `status` filter accepts both the repeated form
/// (`status=Running&status=Failed`) and a comma-separated value.
pub async fn list(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<WorkflowList>, HttpError> {
    let phases = status_phases(query.as_deref().unwrap_or_default());
    Ok(Json(state.workflows.list(&state.namespace, phases).await?))
}

/// Collect every `status` parameter, splitting comma-joined values.
fn status_phases(query: &str) -> Vec<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "status")
        .flat_map(|(_, value)| {
            value
                .split(',')
                .filter(|phase| !phase.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Fetch a single workflow resource.
pub async fn get(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> Result<Json<Workflow>, HttpError> {
    Ok(Json(state.workflows.get(&namespace, &name).await?))
}

#[cfg(test)]
mod tests {
    use super::status_phases;

    #[test]
    fn repeated_params_collect_in_order() {
        assert_eq!(
            status_phases("status=Running&status=Failed"),
            vec!["Running", "Failed"]
        );
    }

    #[test]
    fn comma_form_still_splits() {
        assert_eq!(status_phases("status=Running,Failed"), vec!["Running", "Failed"]);
    }

    #[test]
    fn other_params_and_empty_values_are_ignored() {
        assert!(status_phases("").is_empty());
        assert_eq!(status_phases("foo=bar&status=&status=Running"), vec!["Running"]);
    }
}
