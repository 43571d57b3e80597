//! Relay control frames: the handshake sent by the client and the
//! acknowledgment/error frames sent back.
//!
//! Everything after the handshake is opaque MQTT bytes and never touches
//! this module.

use serde::{Deserialize, Serialize};

/// Result of interpreting a session's first message.
///
/// The three-way split matters: a payload that is valid JSON but not a
/// well-formed connect frame gets an error reply, while a payload that is
/// not JSON at all silently degrades the session to raw mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handshake {
    /// Well-formed connect frame naming a broker endpoint.
    Connect {
        /// Broker hostname or IP address.
        host: String,
        /// Broker TCP port.
        port: u16,
    },
    /// Valid JSON, but not a usable connect frame. Carries the error
    /// message to report to the client.
    Invalid(&'static str),
    /// Not JSON; the client is speaking raw MQTT with no relay target.
    Raw,
}

/// Interprets the first message of a relay session.
///
/// Expected shape:
/// ```json
/// {"type": "connect", "broker": {"host": "test.mosquitto.org", "port": 1883}}
/// ```
///
/// An empty host or a zero/out-of-range port is rejected without ever
/// attempting a connection.
#[must_use]
pub fn parse_handshake(payload: &[u8]) -> Handshake {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(payload) else {
        return Handshake::Raw;
    };

    let is_connect = value.get("type").and_then(serde_json::Value::as_str) == Some("connect");
    if !is_connect || !value.get("broker").is_some_and(serde_json::Value::is_object) {
        return Handshake::Invalid("First message must be connection config");
    }

    let host = value
        .pointer("/broker/host")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    let port = value
        .pointer("/broker/port")
        .and_then(serde_json::Value::as_u64)
        .unwrap_or_default();

    let Ok(port) = u16::try_from(port) else {
        return Handshake::Invalid("Invalid broker configuration");
    };
    if host.is_empty() || port == 0 {
        return Handshake::Invalid("Invalid broker configuration");
    }

    Handshake::Connect {
        host: host.to_string(),
        port,
    }
}

/// Server → client control frame, sent as a JSON text message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlFrame {
    /// Broker TCP connection established; relaying begins.
    Connected {
        /// Always `"success"`.
        status: String,
    },
    /// Handshake validation failure, connect failure, or broker error.
    Error {
        /// Human-readable failure description.
        message: String,
    },
}

impl ControlFrame {
    /// The `{"type":"connected","status":"success"}` acknowledgment.
    #[must_use]
    pub fn connected() -> Self {
        Self::Connected {
            status: "success".to_string(),
        }
    }

    /// An `{"type":"error","message":...}` frame.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Serializes the frame to its wire representation.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn valid_connect_frame() {
        let payload = br#"{"type":"connect","broker":{"host":"127.0.0.1","port":1883}}"#;
        let parsed = parse_handshake(payload);
        assert_eq!(
            parsed,
            Handshake::Connect {
                host: "127.0.0.1".to_string(),
                port: 1883,
            }
        );
    }

    #[test]
    fn empty_host_is_invalid() {
        let payload = br#"{"type":"connect","broker":{"host":"","port":1883}}"#;
        assert_eq!(
            parse_handshake(payload),
            Handshake::Invalid("Invalid broker configuration")
        );
    }

    #[test]
    fn missing_port_is_invalid() {
        let payload = br#"{"type":"connect","broker":{"host":"localhost"}}"#;
        assert_eq!(
            parse_handshake(payload),
            Handshake::Invalid("Invalid broker configuration")
        );
    }

    #[test]
    fn zero_port_is_invalid() {
        let payload = br#"{"type":"connect","broker":{"host":"localhost","port":0}}"#;
        assert_eq!(
            parse_handshake(payload),
            Handshake::Invalid("Invalid broker configuration")
        );
    }

    #[test]
    fn oversized_port_is_invalid() {
        let payload = br#"{"type":"connect","broker":{"host":"localhost","port":70000}}"#;
        assert_eq!(
            parse_handshake(payload),
            Handshake::Invalid("Invalid broker configuration")
        );
    }

    #[test]
    fn wrong_type_is_invalid_not_raw() {
        let payload = br#"{"type":"subscribe","topic":"sensors/#"}"#;
        assert_eq!(
            parse_handshake(payload),
            Handshake::Invalid("First message must be connection config")
        );
    }

    #[test]
    fn json_scalar_is_invalid_not_raw() {
        // JSON.parse would accept these, so they are malformed config,
        // not raw MQTT.
        assert_eq!(
            parse_handshake(b"42"),
            Handshake::Invalid("First message must be connection config")
        );
    }

    #[test]
    fn non_json_is_raw() {
        // 0x10 is an MQTT CONNECT packet type byte.
        assert_eq!(parse_handshake(&[0x10, 0x0c, 0x00, 0x04]), Handshake::Raw);
        assert_eq!(parse_handshake(b"definitely not json"), Handshake::Raw);
    }

    #[test]
    fn connected_frame_wire_shape() {
        let json = ControlFrame::connected().to_json();
        assert_eq!(json, r#"{"type":"connected","status":"success"}"#);
    }

    #[test]
    fn error_frame_wire_shape() {
        let json = ControlFrame::error("Invalid broker configuration").to_json();
        assert_eq!(
            json,
            r#"{"type":"error","message":"Invalid broker configuration"}"#
        );
    }

    #[test]
    fn control_frames_round_trip() {
        let frame = ControlFrame::error("connection refused");
        let Ok(parsed) = serde_json::from_str::<ControlFrame>(&frame.to_json()) else {
            panic!("control frame should deserialize");
        };
        assert_eq!(parsed, frame);
    }
}
