//! Wire format — one named push-channel frame per event.
//!
//! Dashboards receive JSON text frames shaped `{"event": <name>, "data":
//! <payload>}`. The name vocabulary follows the configured schema mode:
//! `temperature` and `rssi` for the metric feeds, `message` for full
//! telemetry and passthrough. Payload key names (`nodeId`, `helpRequested`)
//! match what the dashboard charts bind to.

use serde::Serialize;
use serde_json::{json, Value};

use crate::types::{GenericRow, SensorEvent};

/// A push-channel frame before text serialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub event: &'static str,
    pub data: Value,
}

/// Build the named frame for an event.
pub fn frame(event: &SensorEvent) -> Frame {
    match event {
        SensorEvent::Temperature { value } => Frame {
            event: "temperature",
            data: json!(value),
        },
        SensorEvent::RssiReading { node_id, rssi } => Frame {
            event: "rssi",
            data: json!({ "nodeId": node_id, "rssi": rssi }),
        },
        SensorEvent::NodeTelemetry {
            node_id,
            temperature,
            rssi,
            help_requested,
        } => Frame {
            event: "message",
            data: json!({
                "nodeId": node_id,
                "temperature": temperature,
                "rssi": rssi,
                "helpRequested": help_requested,
            }),
        },
        SensorEvent::GenericMessage(row) => Frame {
            event: "message",
            data: match row {
                GenericRow::Named(map) => Value::Object(map.clone()),
                GenericRow::Ordered(fields) => json!(fields),
            },
        },
    }
}

/// Serialize an event to its wire text.
pub fn encode(event: &SensorEvent) -> String {
    serde_json::to_string(&frame(event)).expect("frame is plain JSON and cannot fail to serialize")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_frame() {
        let frame = frame(&SensorEvent::Temperature { value: 21.5 });
        assert_eq!(frame.event, "temperature");
        assert_eq!(frame.data, json!(21.5));
    }

    #[test]
    fn rssi_frame() {
        let frame = frame(&SensorEvent::RssiReading {
            node_id: 3,
            rssi: -75.5,
        });
        assert_eq!(frame.event, "rssi");
        assert_eq!(frame.data, json!({ "nodeId": 3, "rssi": -75.5 }));
    }

    #[test]
    fn telemetry_frame() {
        let frame = frame(&SensorEvent::NodeTelemetry {
            node_id: 2,
            temperature: 18.3,
            rssi: -60,
            help_requested: true,
        });
        assert_eq!(frame.event, "message");
        assert_eq!(
            frame.data,
            json!({ "nodeId": 2, "temperature": 18.3, "rssi": -60, "helpRequested": true })
        );
    }

    #[test]
    fn generic_frames() {
        let ordered = frame(&SensorEvent::GenericMessage(GenericRow::Ordered(vec![
            "2".to_string(),
            "18.3".to_string(),
        ])));
        assert_eq!(ordered.event, "message");
        assert_eq!(ordered.data, json!(["2", "18.3"]));

        let mut map = serde_json::Map::new();
        map.insert("node_id".to_string(), "2".into());
        let named = frame(&SensorEvent::GenericMessage(GenericRow::Named(map)));
        assert_eq!(named.event, "message");
        assert_eq!(named.data, json!({ "node_id": "2" }));
    }

    #[test]
    fn encode_wraps_event_and_data() {
        let text = encode(&SensorEvent::Temperature { value: 21.5 });
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!({ "event": "temperature", "data": 21.5 }));
    }
}
