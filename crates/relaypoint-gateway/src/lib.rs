//! relaypoint gateway library entry.
//!
//! This crate wires the WebSocket transport, presence registry, event relay,
//! and session lifecycle into a runnable gateway. It is intended to be
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod realtime;
pub mod router;
pub mod transport;
