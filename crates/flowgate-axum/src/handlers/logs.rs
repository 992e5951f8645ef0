//! Live step log handler.

use axum::extract::{Path, State};
use axum::response::Response;

use crate::error::HttpError;
use crate::sse;
use crate::state::AppState;

/// Tail a step's main-container log as Server-Sent Events.
///
/// The session stays open until the backend ends the stream or the
/// client disconnects; disconnecting releases the backend tail.
pub async fn stream(
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> Result<Response, HttpError> {
    let source = state.workflows.stream_step_logs(&namespace, &name).await?;
    Ok(sse::live_stream(source, |line| line))
}
