//! Decode-once codec for the transport layer.
//!
//! - Text frames => typed `ClientEvent`
//! - Ping/Pong/Close are surfaced for lifecycle management
//! - Binary frames are rejected (the protocol is JSON text only)

use axum::extract::ws::Message;

use relaypoint_core::{
    error::{RelayError, Result},
    protocol::events::ClientEvent,
};

#[derive(Debug)]
pub enum Inbound {
    Event(ClientEvent),
    Ping(Vec<u8>),
    Pong,
    Close,
}

pub fn decode(msg: Message) -> Result<Inbound> {
    match msg {
        Message::Text(s) => {
            let ev: ClientEvent = serde_json::from_str(&s)
                .map_err(|e| RelayError::BadRequest(format!("invalid event json: {e}")))?;
            ev.validate()?;
            Ok(Inbound::Event(ev))
        }
        Message::Binary(_) => Err(RelayError::BadRequest("binary frames not supported".into())),
        Message::Ping(payload) => Ok(Inbound::Ping(payload)),
        Message::Pong(_) => Ok(Inbound::Pong),
        Message::Close(_) => Ok(Inbound::Close),
    }
}
