//! Realtime runtime for the relaypoint gateway.
//!
//! Presence registry + event relay + per-connection session lifecycle.

pub mod core;
pub mod types;

pub use core::{Connection, EventRelay, PresenceRegistry, Session};
pub use types::PreparedEvent;
