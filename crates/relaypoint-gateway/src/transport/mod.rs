//! Transport layer (WebSocket).
//!
//! Exposes the WS upgrade handler and the codec that decodes frames once
//! before they reach the session lifecycle.

pub mod codec;
pub mod ws;
