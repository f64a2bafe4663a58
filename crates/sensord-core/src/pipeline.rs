//! Pipeline context — the one object that owns per-feed parser state and
//! drives chunk → line → event → broadcast, strictly in order.
//!
//! ```text
//! Feed (Bytes) ──► LineBuffer ──► Router ──► SubscriberRegistry
//! ```
//!
//! One pipeline instance services one feed; there are no globals and no
//! internal parallelism. The registry is shared with the push-channel layer,
//! everything else here is owned state.

use std::sync::Arc;

use bytes::Bytes;
use futures::{Stream, StreamExt};

use crate::broadcast::SubscriberRegistry;
use crate::framing::{split_fields, LineBuffer};
use crate::router;
use crate::types::{SchemaMode, SensorEvent};

pub struct Pipeline {
    buffer: LineBuffer,
    mode: SchemaMode,
    columns: Option<Vec<String>>,
    registry: Arc<SubscriberRegistry>,
}

impl Pipeline {
    /// `columns` is only meaningful in [`SchemaMode::Passthrough`]; other
    /// modes ignore it.
    pub fn new(
        mode: SchemaMode,
        columns: Option<Vec<String>>,
        registry: Arc<SubscriberRegistry>,
    ) -> Self {
        Self {
            buffer: LineBuffer::new(),
            mode,
            columns,
            registry,
        }
    }

    pub fn mode(&self) -> SchemaMode {
        self.mode
    }

    /// Classify one complete line and publish the resulting event, if any.
    ///
    /// This is the boundary the surrounding server layer calls when it
    /// already holds a full line; [`ingest_chunk`] funnels here too.
    ///
    /// [`ingest_chunk`]: Pipeline::ingest_chunk
    pub fn ingest_line(&mut self, line: &str) -> Option<SensorEvent> {
        let fields = split_fields(line);
        let event = router::classify(&fields, self.mode, self.columns.as_deref())?;
        self.registry.publish(&event);
        Some(event)
    }

    /// Feed one raw chunk from the input source. Returns the number of
    /// events published.
    pub fn ingest_chunk(&mut self, chunk: &[u8]) -> usize {
        let mut published = 0;
        for line in self.buffer.feed(chunk) {
            match self.ingest_line(&line) {
                Some(_) => published += 1,
                None => tracing::trace!(line = %line, "row dropped"),
            }
        }
        published
    }

    /// Drive the pipeline until the feed closes. The await on the next chunk
    /// is the pipeline's only suspension point.
    pub async fn run<S>(mut self, mut feed: S)
    where
        S: Stream<Item = Bytes> + Unpin,
    {
        while let Some(chunk) = feed.next().await {
            self.ingest_chunk(&chunk);
        }
        tracing::info!(mode = %self.mode, "feed closed, pipeline stopped");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
