//! Broadcast sink — the set of connected dashboard subscribers and the
//! fan-out of serialized frames to all of them.
//!
//! # Thread safety
//!
//! Connect and disconnect run on WebSocket handler tasks while the pipeline
//! task publishes. Membership lives behind an `RwLock`; [`publish`] clones
//! the sender set under the read lock and iterates the snapshot, so a
//! connect or disconnect racing a publish never blocks the fan-out and
//! never aborts it.
//!
//! # Delivery semantics
//!
//! Best-effort, latest-value-only: there is no backlog, so a subscriber
//! receives exactly the frames published between its connect and disconnect.
//! A subscriber whose receiver is gone is skipped and pruned; per-subscriber
//! buffering is the channel's concern, not the sink's.
//!
//! [`publish`]: SubscriberRegistry::publish

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use tokio::sync::mpsc;

use crate::types::SensorEvent;
use crate::wire;

/// Unique subscriber identifier, monotonically assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl std::fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Registry of currently connected subscribers. `Arc`-share one instance
/// between the pipeline task and the connection handlers.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    next_id: AtomicU64,
    senders: RwLock<HashMap<SubscriberId, mpsc::UnboundedSender<String>>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber.
    ///
    /// The returned receiver yields every frame published after this call;
    /// nothing published earlier is replayed.
    pub fn subscribe(&self) -> (SubscriberId, mpsc::UnboundedReceiver<String>) {
        let id = SubscriberId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders
            .write()
            .expect("subscriber set lock poisoned")
            .insert(id, tx);
        tracing::debug!(%id, "subscriber connected");
        (id, rx)
    }

    /// Remove a subscriber. Calling twice is harmless.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let removed = self
            .senders
            .write()
            .expect("subscriber set lock poisoned")
            .remove(&id)
            .is_some();
        if removed {
            tracing::debug!(%id, "subscriber disconnected");
        }
    }

    /// Number of currently connected subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.senders
            .read()
            .expect("subscriber set lock poisoned")
            .len()
    }

    /// Serialize `event` once and push the frame to every connected
    /// subscriber. Returns how many subscribers it was delivered to.
    pub fn publish(&self, event: &SensorEvent) -> usize {
        let text = wire::encode(event);

        let snapshot: Vec<(SubscriberId, mpsc::UnboundedSender<String>)> = {
            let senders = self.senders.read().expect("subscriber set lock poisoned");
            senders.iter().map(|(id, tx)| (*id, tx.clone())).collect()
        };

        let mut delivered = 0;
        let mut stale = Vec::new();
        for (id, tx) in snapshot {
            if tx.send(text.clone()).is_ok() {
                delivered += 1;
            } else {
                stale.push(id);
            }
        }
        for id in stale {
            self.unsubscribe(id);
        }
        delivered
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
