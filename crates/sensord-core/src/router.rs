//! Schema router — recognizes a parsed row's shape under the configured
//! [`SchemaMode`] and builds the corresponding [`SensorEvent`].
//!
//! Classification is deliberately forgiving: a wrong field count, an unknown
//! discriminator, or a non-numeric token where a number is required drops
//! the row and nothing else. No error reaches a client; a dropped row is
//! visible downstream only as a missing sample. The feed favors
//! availability over strict validation, and that policy is intentional.
//!
//! Discriminator-based modes tolerate extra trailing fields (rows are read
//! positionally). Full-telemetry is a fixed four-column layout and requires
//! exactly four.

use crate::types::{GenericRow, SchemaMode, SensorEvent};

/// Classify one parsed row, or `None` when it does not match the active
/// mode's shape.
///
/// `columns` is only consulted in [`SchemaMode::Passthrough`]: when set, the
/// row becomes a named mapping and its field count must equal the column
/// count so keys and values never misalign.
pub fn classify(
    fields: &[String],
    mode: SchemaMode,
    columns: Option<&[String]>,
) -> Option<SensorEvent> {
    match mode {
        SchemaMode::SingleMetric => match fields {
            [tag, value, ..] if tag.as_str() == "temperature" => Some(SensorEvent::Temperature {
                value: value.parse().ok()?,
            }),
            _ => None,
        },
        SchemaMode::DualMetric => match fields {
            [tag, value, ..] if tag.as_str() == "temperature" => Some(SensorEvent::Temperature {
                value: value.parse().ok()?,
            }),
            [tag, node_id, rssi, ..] if tag.as_str() == "rssi" => Some(SensorEvent::RssiReading {
                node_id: node_id.parse().ok()?,
                rssi: rssi.parse().ok()?,
            }),
            _ => None,
        },
        SchemaMode::FullTelemetry => match fields {
            [node_id, temperature, rssi, help] => Some(SensorEvent::NodeTelemetry {
                node_id: node_id.parse().ok()?,
                temperature: temperature.parse().ok()?,
                rssi: rssi.parse().ok()?,
                help_requested: help.parse::<u8>().ok()? == 1,
            }),
            _ => None,
        },
        SchemaMode::Passthrough => match columns {
            Some(names) => {
                if names.len() != fields.len() {
                    return None;
                }
                let map = names
                    .iter()
                    .cloned()
                    .zip(fields.iter().map(|f| serde_json::Value::from(f.clone())))
                    .collect();
                Some(SensorEvent::GenericMessage(GenericRow::Named(map)))
            }
            None => Some(SensorEvent::GenericMessage(GenericRow::Ordered(
                fields.to_vec(),
            ))),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
