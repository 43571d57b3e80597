//! MQTT-over-WebSocket relay.
//!
//! Browsers cannot open raw TCP sockets, so the simulator frontend speaks
//! MQTT through this relay: each WebSocket session accepted at `/mqtt-proxy`
//! is paired with at most one outbound TCP connection to a broker named in
//! the session's first message, and all subsequent traffic is forwarded
//! verbatim in both directions.
//!
//! The relay never parses MQTT packets. Chunk boundaries are whatever the
//! transports deliver; MQTT framing is the client's concern.

pub mod handler;
pub mod messages;
pub mod registry;
pub mod session;
