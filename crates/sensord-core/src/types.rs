//! Core types for sensord-core.
//!
//! This module defines the fundamental data structures shared across the
//! pipeline layers: the classified [`SensorEvent`], the [`SchemaMode`]
//! discriminant, and the [`GenericRow`] payload used by passthrough mode.

use std::str::FromStr;

/// A classified telemetry event, at most one per input line.
///
/// The set is closed: the router only ever produces these shapes and the
/// wire layer knows how to name each of them. Events are transient — they
/// are serialized and fanned out once, never stored or replayed.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorEvent {
    /// A bare temperature sample (single- and dual-metric feeds).
    Temperature { value: f64 },
    /// Link quality reported for one node (dual-metric feeds).
    RssiReading { node_id: u32, rssi: f64 },
    /// Full per-node sample from the columnar feed.
    NodeTelemetry {
        node_id: u32,
        temperature: f64,
        rssi: i32,
        help_requested: bool,
    },
    /// Verbatim row forwarded by passthrough mode.
    GenericMessage(GenericRow),
}

/// Row payload carried by [`SensorEvent::GenericMessage`].
#[derive(Debug, Clone, PartialEq)]
pub enum GenericRow {
    /// Column names were configured; fields are keyed by them.
    Named(serde_json::Map<String, serde_json::Value>),
    /// No column names configured; fields keep their on-wire order.
    Ordered(Vec<String>),
}

/// Which row shapes the router recognizes and which message vocabulary the
/// sink emits. Fixed once at startup — never auto-detected, never mixed
/// within one deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMode {
    /// `temperature,<value>` rows only.
    SingleMetric,
    /// `temperature,<value>` and `rssi,<node>,<value>` rows.
    DualMetric,
    /// Fixed `node_id,temperature,rssi,help` columns, no discriminator.
    FullTelemetry,
    /// Every row forwarded verbatim, regardless of shape.
    Passthrough,
}

impl std::fmt::Display for SchemaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaMode::SingleMetric => write!(f, "single-metric"),
            SchemaMode::DualMetric => write!(f, "dual-metric"),
            SchemaMode::FullTelemetry => write!(f, "full-telemetry"),
            SchemaMode::Passthrough => write!(f, "passthrough"),
        }
    }
}

/// Error returned when a schema mode string is not one of the known modes.
#[derive(Debug, thiserror::Error)]
#[error("unknown schema mode {0:?} (expected single-metric, dual-metric, full-telemetry, or passthrough)")]
pub struct UnknownSchemaMode(String);

impl FromStr for SchemaMode {
    type Err = UnknownSchemaMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single-metric" => Ok(SchemaMode::SingleMetric),
            "dual-metric" => Ok(SchemaMode::DualMetric),
            "full-telemetry" => Ok(SchemaMode::FullTelemetry),
            "passthrough" => Ok(SchemaMode::Passthrough),
            other => Err(UnknownSchemaMode(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
