//! Wire protocol (JSON text frames).
//!
//! Every frame is a JSON object tagged by a `type` field, decoded once at
//! the transport edge into a typed event. All parsers are panic-free:
//! malformed input is reported as `RelayError` instead of panicking, keeping
//! the gateway resilient to hostile traffic.

pub mod events;
