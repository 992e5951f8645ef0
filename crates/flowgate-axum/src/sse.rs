//! Server-Sent Events transport for live sessions.
//!
//! Relays a subscribed event session to an HTTP response body, one
//! `data:` frame per data event. Terminal events close the connection
//! silently: the client sees end-of-stream, never an error payload.
//! Dropping the response body (client disconnect) drops the session's
//! [`Subscription`](flowgate_core::Subscription), which detaches the
//! backend stream.

use std::convert::Infallible;

use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use flowgate_core::{EventSource, StreamEvent};
use futures_util::StreamExt;

/// Serve an event source as an SSE response.
///
/// Each data event becomes exactly `data:<formatted>\n\n`; no other
/// frames (no comments, no keep-alives) are ever emitted, so byte-level
/// consumers can rely on the framing.
pub fn live_stream<T, F>(source: EventSource<T>, mut format: F) -> Response
where
    T: Send + 'static,
    F: FnMut(T) -> String + Send + 'static,
{
    let (events, subscription) = source.subscribe();

    // The subscription lives inside the closure. When the client goes
    // away axum drops the body stream, the closure with it, and the
    // subscription's Drop cancels the backend session.
    let frames = events.filter_map(move |event| {
        let _session = &subscription;
        let frame: Option<Result<Bytes, Infallible>> = match event {
            StreamEvent::Data(item) => {
                Some(Ok(Bytes::from(format!("data:{}\n\n", format(item)))))
            }
            StreamEvent::Error(err) => {
                tracing::debug!(target: "flowgate.sse", error = %err, "session ended by backend error");
                None
            }
            StreamEvent::Complete => None,
        };
        futures_util::future::ready(frame)
    });

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::TRANSFER_ENCODING, "chunked"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        Body::from_stream(frames),
    )
        .into_response()
}
