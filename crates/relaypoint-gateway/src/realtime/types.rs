use axum::extract::ws::Message;

use relaypoint_core::error::{RelayError, Result};
use relaypoint_core::protocol::events::ServerEvent;

/// Outbound event serialized once and cached for fan-out
/// (serialize once, send N times).
#[derive(Debug, Clone)]
pub struct PreparedEvent {
    text: String,
}

impl PreparedEvent {
    pub fn prepare(event: &ServerEvent) -> Result<Self> {
        let text = serde_json::to_string(event)
            .map_err(|e| RelayError::Internal(format!("encode {} failed: {e}", event.name())))?;
        Ok(Self { text })
    }

    /// Convert to an axum WS message for transport.
    pub fn to_ws_message(&self) -> Message {
        Message::Text(self.text.clone())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
