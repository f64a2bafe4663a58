//! Synthetic generator — fabricates feed lines on a fixed timer so the
//! pipeline can be exercised without a live sensor bridge.
//!
//! Everything this module emits must classify successfully under the same
//! schema mode the pipeline runs with; the harness pins that property.
//! Field domains follow the reference hardware: temperature 10–30 °C,
//! rssi −100–0 dBm (−100 to −30 in dual-metric), node ids 0–5, help flag
//! raised about one tick in ten.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures::Stream;
use rand::Rng;
use tokio::sync::mpsc;

use sensord_core::SchemaMode;

const TEMP_RANGE: std::ops::Range<f64> = 10.0..30.0;
const NODE_IDS: std::ops::RangeInclusive<u32> = 0..=5;
const RSSI_RANGE: std::ops::RangeInclusive<i32> = -100..=0;
const DUAL_RSSI_RANGE: std::ops::Range<f64> = -100.0..-30.0;
/// One tick in ten raises the help flag.
const HELP_ODDS: u32 = 10;

/// Build the line(s) emitted on one generator tick.
///
/// Single-metric ticks carry one temperature row; dual-metric ticks carry a
/// temperature row and an rssi row so both dashboard series advance each
/// tick; columnar ticks carry one full-telemetry row. Passthrough reuses the
/// columnar shape — passthrough classifies anything, and four fields keep a
/// four-name column config aligned.
pub fn tick_lines(mode: SchemaMode, rng: &mut impl Rng) -> Vec<String> {
    match mode {
        SchemaMode::SingleMetric => {
            vec![format!("temperature,{:.2}", rng.gen_range(TEMP_RANGE))]
        }
        SchemaMode::DualMetric => vec![
            format!("temperature,{:.2}", rng.gen_range(TEMP_RANGE)),
            format!(
                "rssi,{},{:.2}",
                rng.gen_range(NODE_IDS),
                rng.gen_range(DUAL_RSSI_RANGE)
            ),
        ],
        SchemaMode::FullTelemetry | SchemaMode::Passthrough => {
            let help = u32::from(rng.gen_range(0..HELP_ODDS) == 0);
            vec![format!(
                "{},{:.2},{},{}",
                rng.gen_range(NODE_IDS),
                rng.gen_range(TEMP_RANGE),
                rng.gen_range(RSSI_RANGE),
                help
            )]
        }
    }
}

/// Synthetic chunk stream. Each tick's lines arrive as one chunk. Dropping
/// the stream stops the generator task.
pub struct SyntheticFeed {
    rx: mpsc::UnboundedReceiver<Bytes>,
}

impl Stream for SyntheticFeed {
    type Item = Bytes;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Spawn the generator task and return its feed.
///
/// Ticks are serialized by construction — one task awaits one interval, so
/// a tick can never overlap the previous one. If a tick overruns the
/// cadence, the missed firings are skipped rather than bunched.
pub fn synthetic_feed(mode: SchemaMode, tick: Duration) -> SyntheticFeed {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            let chunk: String = {
                let mut rng = rand::thread_rng();
                tick_lines(mode, &mut rng)
                    .iter()
                    .map(|line| format!("{line}\n"))
                    .collect()
            };
            if tx.send(Bytes::from(chunk)).is_err() {
                break; // feed dropped, the pipeline is gone
            }
        }
    });
    SyntheticFeed { rx }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
