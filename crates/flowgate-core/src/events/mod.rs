//! Typed event stream adaptation.
//!
//! Bridges an arbitrary push-based, possibly infinite backend byte stream
//! (object storage relays, live log tails) into a uniform, cancellable,
//! typed event sequence. The adapter is cold and single-subscriber: no
//! work happens until [`EventSource::subscribe`], and the returned
//! [`Subscription`] is the one handle that detaches the backend again.
//!
//! Lifecycle contract:
//! - chunks are forwarded in arrival order, one [`StreamEvent::Data`] each
//! - exactly one terminal event per session ([`StreamEvent::Error`] or
//!   [`StreamEvent::Complete`]), nothing after it
//! - cancelling is idempotent and safe after natural termination
//! - once cancelled, no further events are observed by the subscriber

use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Buffered events between the forwarder and a slow subscriber.
const SESSION_CHANNEL_CAPACITY: usize = 16;

/// A raw backend stream: chunks in arrival order, terminated by either
/// end-of-stream or a single error.
pub type RawByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StreamError>> + Send>>;

/// Failure reported by a backend stream.
///
/// Forwarded once, untransformed, as the terminal event of a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StreamError {
    pub message: String,
}

impl StreamError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&str> for StreamError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// One event in a typed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent<T> {
    /// A converted backend chunk.
    Data(T),
    /// Terminal: the backend failed.
    Error(StreamError),
    /// Terminal: the backend finished normally.
    Complete,
}

impl<T> StreamEvent<T> {
    /// Whether this event ends the session.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::Complete)
    }
}

/// A cold, single-subscriber adapter from a raw backend stream to typed
/// events. Created with [`EventSource::adapt`]; consumed by
/// [`EventSource::subscribe`].
pub struct EventSource<T> {
    raw: RawByteStream,
    convert: Box<dyn FnMut(Bytes) -> T + Send>,
}

impl<T> std::fmt::Debug for EventSource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSource").finish_non_exhaustive()
    }
}

impl<T: Send + 'static> EventSource<T> {
    /// Wrap a raw backend stream, converting each chunk with `convert`.
    ///
    /// The conversion is infallible by construction; callers that need
    /// fallible decoding put a `Result` in `T` and decide per event.
    pub fn adapt<S, F>(raw: S, convert: F) -> Self
    where
        S: Stream<Item = Result<Bytes, StreamError>> + Send + 'static,
        F: FnMut(Bytes) -> T + Send + 'static,
    {
        Self {
            raw: Box::pin(raw),
            convert: Box::new(convert),
        }
    }

    /// Start the session. Spawns the forwarding task and hands back the
    /// event sequence plus its cancellation handle.
    ///
    /// Dropping either half tears the session down: the subscription
    /// cancels on drop, and a dropped stream makes the next forward fail,
    /// stopping the task and releasing the backend stream.
    pub fn subscribe(self) -> (EventStream<T>, Subscription) {
        let (tx, rx) = mpsc::channel(SESSION_CHANNEL_CAPACITY);
        let cancelled = Arc::new(AtomicBool::new(false));

        let mut raw = self.raw;
        let mut convert = self.convert;
        let handle = tokio::spawn(async move {
            while let Some(item) = raw.next().await {
                match item {
                    Ok(chunk) => {
                        if tx.send(StreamEvent::Data(convert(chunk))).await.is_err() {
                            // Subscriber went away; release the backend.
                            return;
                        }
                    }
                    Err(cause) => {
                        let _ = tx.send(StreamEvent::Error(cause)).await;
                        return;
                    }
                }
            }
            let _ = tx.send(StreamEvent::Complete).await;
        });

        let stream = EventStream {
            inner: ReceiverStream::new(rx),
            cancelled: Arc::clone(&cancelled),
            done: false,
        };
        let subscription = Subscription { cancelled, handle };
        (stream, subscription)
    }
}

impl EventSource<String> {
    /// Convenience adapter for line-oriented text backends: chunks are
    /// treated opaquely and converted with lossy UTF-8.
    pub fn adapt_text<S>(raw: S) -> Self
    where
        S: Stream<Item = Result<Bytes, StreamError>> + Send + 'static,
    {
        Self::adapt(raw, |chunk| String::from_utf8_lossy(&chunk).into_owned())
    }
}

/// The subscriber half of a session: yields [`StreamEvent`]s and ends
/// after the terminal event or cancellation, whichever comes first.
pub struct EventStream<T> {
    inner: ReceiverStream<StreamEvent<T>>,
    cancelled: Arc<AtomicBool>,
    done: bool,
}

impl<T> Stream for EventStream<T> {
    type Item = StreamEvent<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.done || this.cancelled.load(Ordering::SeqCst) {
            return Poll::Ready(None);
        }
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(event)) => {
                if event.is_terminal() {
                    this.done = true;
                }
                Poll::Ready(Some(event))
            }
            Poll::Ready(None) => {
                this.done = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Cancellation handle for one session.
///
/// Cancelling detaches the forwarder from the backend stream so no further
/// conversion work happens. Idempotent; also safe after the session has
/// already terminated naturally. Cancels on drop.
pub struct Subscription {
    cancelled: Arc<AtomicBool>,
    handle: tokio::task::JoinHandle<()>,
}

impl Subscription {
    /// Detach from the backend. Calling this more than once, or after the
    /// terminal event, is a no-op.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.handle.abort();
        }
    }

    /// Whether `cancel` has been invoked.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn chunks(items: &[&str]) -> Vec<Result<Bytes, StreamError>> {
        items
            .iter()
            .map(|s| Ok(Bytes::copy_from_slice(s.as_bytes())))
            .collect()
    }

    #[tokio::test]
    async fn forwards_chunks_in_order_then_completes() {
        let raw = stream::iter(chunks(&["a", "b", "c"]));
        let (mut events, _subscription) = EventSource::adapt_text(raw).subscribe();

        let mut seen = Vec::new();
        while let Some(event) = events.next().await {
            seen.push(event);
        }
        assert_eq!(
            seen,
            vec![
                StreamEvent::Data("a".to_string()),
                StreamEvent::Data("b".to_string()),
                StreamEvent::Data("c".to_string()),
                StreamEvent::Complete,
            ]
        );

        // Nothing after the terminal event.
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn backend_error_is_forwarded_once_untransformed() {
        let raw = stream::iter(vec![
            Ok(Bytes::from_static(b"a")),
            Err(StreamError::new("connection reset")),
        ]);
        let (mut events, _subscription) = EventSource::adapt_text(raw).subscribe();

        assert_eq!(events.next().await, Some(StreamEvent::Data("a".into())));
        assert_eq!(
            events.next().await,
            Some(StreamEvent::Error(StreamError::new("connection reset")))
        );
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn convert_runs_per_chunk() {
        let raw = stream::iter(chunks(&["ab", "cde"]));
        let source = EventSource::adapt(raw, |chunk: Bytes| chunk.len());
        let (mut events, _subscription) = source.subscribe();

        assert_eq!(events.next().await, Some(StreamEvent::Data(2)));
        assert_eq!(events.next().await, Some(StreamEvent::Data(3)));
        assert_eq!(events.next().await, Some(StreamEvent::Complete));
    }

    #[tokio::test]
    async fn cancel_is_idempotent() {
        let raw = stream::pending::<Result<Bytes, StreamError>>();
        let (_events, subscription) = EventSource::adapt_text(raw).subscribe();

        subscription.cancel();
        subscription.cancel();
        assert!(subscription.is_cancelled(), "still cancelled after double call");
    }

    #[tokio::test]
    async fn cancel_after_natural_termination_is_a_noop() {
        let raw = stream::iter(chunks(&["a"]));
        let (mut events, subscription) = EventSource::adapt_text(raw).subscribe();

        while events.next().await.is_some() {}
        subscription.cancel();
        subscription.cancel();
    }

    #[tokio::test]
    async fn no_events_are_observed_after_cancellation() {
        let (raw_tx, raw_rx) = mpsc::channel::<Result<Bytes, StreamError>>(4);
        let raw = ReceiverStream::new(raw_rx);
        let (mut events, subscription) = EventSource::adapt_text(raw).subscribe();

        raw_tx.send(Ok(Bytes::from_static(b"a"))).await.unwrap();
        assert_eq!(events.next().await, Some(StreamEvent::Data("a".into())));

        subscription.cancel();
        raw_tx.send(Ok(Bytes::from_static(b"b"))).await.ok();

        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn lossy_text_conversion_never_fails() {
        let raw = stream::iter(vec![Ok(Bytes::from_static(&[0xff, 0x61]))]);
        let (mut events, _subscription) = EventSource::adapt_text(raw).subscribe();

        match events.next().await {
            Some(StreamEvent::Data(text)) => assert!(text.ends_with('a')),
            other => panic!("expected data event, got {other:?}"),
        }
    }
}
