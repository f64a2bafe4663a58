//! Shared test utilities for sensord integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file.

// Each harness binary compiles this module independently and uses a subset.
#![allow(dead_code)]

pub mod fake_feed;

pub use fake_feed::*;

use tokio::sync::mpsc::UnboundedReceiver;

/// Decode one wire frame into its `(event name, data payload)` pair.
pub fn decode_frame(text: &str) -> (String, serde_json::Value) {
    let value: serde_json::Value =
        serde_json::from_str(text).unwrap_or_else(|err| panic!("malformed frame {text:?}: {err}"));
    let event = value["event"]
        .as_str()
        .unwrap_or_else(|| panic!("frame without event name: {text:?}"))
        .to_string();
    (event, value["data"].clone())
}

/// Drain every frame currently buffered on a subscriber receiver.
pub fn drain_frames(rx: &mut UnboundedReceiver<String>) -> Vec<(String, serde_json::Value)> {
    let mut frames = Vec::new();
    while let Ok(text) = rx.try_recv() {
        frames.push(decode_frame(&text));
    }
    frames
}
