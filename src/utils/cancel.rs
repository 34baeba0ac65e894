//! Cancellation utilities
//!
//! Provides first-class cancellation handles for calls and streams. A
//! [`CancelHandle`] passed in [`CallOptions`](crate::types::CallOptions)
//! aborts the in-flight HTTP request; once a response is streaming, it stops
//! further event emission. Dropping the cancelled stream closes the
//! underlying HTTP connection so the provider stops generating tokens.

use tokio_util::sync::CancellationToken;

use crate::stream::EventStream;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Create a new cancel handle.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. Any calls or streams observing this handle stop
    /// as soon as possible and resolve as [`LlmError::Cancelled`](crate::error::LlmError::Cancelled)
    /// or end-of-stream.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

// Stream-based cancellation is implemented via async_stream to avoid pin projection.

/// Wrap an event stream so it stops emitting once `handle` is cancelled.
pub fn wrap_stream(stream: EventStream, handle: CancelHandle) -> EventStream {
    let token = handle.token;
    let mut inner = stream;
    let s = async_stream::stream! {
        use futures::StreamExt;
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                item = inner.next() => {
                    let Some(item) = item else { break };
                    yield item;
                }
            }
        }
    };
    Box::pin(s)
}

/// Make an event stream cancellable and return its cancel handle.
pub fn make_cancellable_stream(stream: EventStream) -> (EventStream, CancelHandle) {
    let handle = CancelHandle::new();
    let wrapped = wrap_stream(stream, handle.clone());
    (wrapped, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn cancel_wakes_pending_next_immediately() {
        // A stream that never yields and never ends.
        let pending: EventStream = Box::pin(futures_util::stream::pending());
        let (mut s, cancel) = make_cancellable_stream(pending);

        let waiter = tokio::spawn(async move { s.next().await });

        // Give the task a chance to poll and block on `next()`.
        tokio::task::yield_now().await;

        cancel.cancel();

        let out = tokio::time::timeout(std::time::Duration::from_millis(200), waiter)
            .await
            .expect("cancel should wake the waiting task")
            .expect("task ok");

        assert!(out.is_none());
    }

    #[tokio::test]
    async fn uncancelled_stream_passes_items_through() {
        let items = vec![
            Ok(crate::stream::StreamEvent::TextDelta {
                delta: "a".to_string(),
            }),
            Ok(crate::stream::StreamEvent::TextDelta {
                delta: "b".to_string(),
            }),
        ];
        let inner: EventStream = Box::pin(futures_util::stream::iter(items));
        let (s, _cancel) = make_cancellable_stream(inner);

        let collected: Vec<_> = s.collect().await;
        assert_eq!(collected.len(), 2);
    }
}
