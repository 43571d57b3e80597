//! # iotsim-gateway
//!
//! Backend gateway for a browser-based IoT device simulator.
//!
//! The simulator UI (device/sensor definitions, dashboards, the periodic
//! publish scheduler) lives entirely in the browser. This crate provides the
//! two server-side pieces the browser cannot do itself:
//!
//! - an **MQTT relay** at `GET /mqtt-proxy`: a WebSocket endpoint that pairs
//!   each browser session with one outbound TCP connection to a
//!   user-specified MQTT broker and forwards opaque bytes in both directions,
//! - a **vendor API proxy** under `/api/proxy/*`: plain HTTP forwarders that
//!   relay requests to a vendor's REST API to sidestep CORS restrictions.
//!
//! ## Architecture
//!
//! ```text
//! Browser (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     │       ├── vendor proxy ──> reqwest ──> vendor REST API
//!     │       └── health / logs / system info
//!     │
//!     └── Relay Handler (relay/)
//!             ├── SessionRegistry (live session bookkeeping)
//!             └── RelaySession ──> TCP ──> MQTT broker
//!
//! LogStore (logstore) captures tracing events for the /api/logs endpoints.
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod logstore;
pub mod relay;
