//! Top-level facade crate for relaypoint.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use relaypoint_core::*;
}

pub mod gateway {
    pub use relaypoint_gateway::*;
}
