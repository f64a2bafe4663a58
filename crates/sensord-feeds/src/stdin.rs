//! Live feed — byte chunks from the process's standard input.
//!
//! The sensor bridge pipes its console output into sensord, so chunks arrive
//! at whatever granularity the pipe delivers. The stream ends when the
//! bridge closes the pipe; there is no reconnect — a closed feed stays
//! closed and the pipeline winds down.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use tokio_util::io::ReaderStream;

/// Chunk stream over stdin. Suspends until bytes arrive; ends at EOF. A
/// read error also ends the feed (logged, never retried).
pub struct StdinFeed {
    inner: ReaderStream<tokio::io::Stdin>,
}

/// Open the live feed.
pub fn stdin_feed() -> StdinFeed {
    StdinFeed {
        inner: ReaderStream::new(tokio::io::stdin()),
    }
}

impl Stream for StdinFeed {
    type Item = Bytes;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match Pin::new(&mut self.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => Poll::Ready(Some(chunk)),
            Poll::Ready(Some(Err(err))) => {
                tracing::warn!(%err, "stdin read failed, closing feed");
                Poll::Ready(None)
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
