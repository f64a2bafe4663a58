//! FakeFeed — a hand-driven byte-chunk stream standing in for the live
//! sensor bridge. Chunks arrive exactly as written, so harnesses can split
//! lines at arbitrary byte boundaries.

use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Handle for pushing chunks into a [`FakeFeed`] stream.
pub struct FakeFeedWriter {
    tx: mpsc::UnboundedSender<Bytes>,
}

impl FakeFeedWriter {
    /// Send raw bytes verbatim — no terminator is appended, so a chunk can
    /// end mid-line.
    pub fn send_chunk(&self, chunk: impl Into<Vec<u8>>) {
        let _ = self.tx.send(Bytes::from(chunk.into()));
    }

    /// Send a complete line, appending the terminator if missing.
    pub fn send_line(&self, line: impl Into<String>) {
        let mut s = line.into();
        if !s.ends_with('\n') {
            s.push('\n');
        }
        let _ = self.tx.send(Bytes::from(s));
    }

    /// Close the feed, causing the consumer to see EOF.
    pub fn close(self) {
        // tx is dropped, closing the channel.
    }
}

/// A fake input source. Implements `Stream<Item = Bytes>` so it can be used
/// wherever the pipeline expects a feed.
pub struct FakeFeed {
    rx: mpsc::UnboundedReceiver<Bytes>,
}

impl Stream for FakeFeed {
    type Item = Bytes;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Create a linked writer/stream pair.
pub fn fake_feed() -> (FakeFeedWriter, FakeFeed) {
    let (tx, rx) = mpsc::unbounded_channel();
    (FakeFeedWriter { tx }, FakeFeed { rx })
}
