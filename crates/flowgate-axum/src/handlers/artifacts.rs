//! Artifact download handler.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::HttpError;
use crate::state::AppState;

/// Fetch one artifact and relay it as a file download.
///
/// Lookups that miss (workflow, node, artifact, secret) come back as
/// `NOT_FOUND`. Storage failures surface as a generic `INTERNAL_ERROR`
/// body; the underlying cause is logged, never sent to the client.
pub async fn download(
    State(state): State<AppState>,
    Path((namespace, name, node_name, artifact_name)): Path<(String, String, String, String)>,
) -> Result<Response, HttpError> {
    let artifact = state
        .artifacts
        .fetch(&namespace, &name, &node_name, &artifact_name)
        .await
        .map_err(|err| {
            if err.is_not_found() {
                HttpError::NotFound(err.to_string())
            } else {
                tracing::error!(target: "flowgate.http", error = %err, "artifact download failed");
                HttpError::Internal("Unable to download artifact".to_owned())
            }
        })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", artifact.filename),
            ),
        ],
        artifact.bytes,
    )
        .into_response())
}
