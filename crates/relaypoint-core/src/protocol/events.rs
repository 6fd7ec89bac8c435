//! Event vocabulary for the presence/relay protocol.
//!
//! Inbound (`ClientEvent`) and outbound (`ServerEvent`) frames are JSON
//! objects tagged by `type`. User profiles are opaque to the gateway: only
//! `userId` is interpreted, the rest of the object rides along untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RelayError, Result};

/// A connected identity as announced by the client.
///
/// `user_id` is the registry key; everything else in the object is
/// denormalized profile data (email, avatar, ...) forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl Identity {
    /// Reject identities without a usable registry key.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.is_empty() {
            return Err(RelayError::BadRequest("identity missing userId".into()));
        }
        Ok(())
    }
}

/// One entry of the presence snapshot broadcast to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineUser {
    pub user: Identity,
    pub connection_id: String,
}

/// Inbound events (client -> gateway).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Identity announcement; transitions the connection to Identified.
    Identify { user: Identity },
    /// Notify a peer that the sender added them as a contact.
    ContactCreated { sender: Identity, receiver: Identity },
    /// Forward a chat message to a peer. The message body is opaque.
    SendMessage {
        message: Value,
        sender: Identity,
        receiver: Identity,
    },
}

impl ClientEvent {
    /// Event name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Identify { .. } => "identify",
            ClientEvent::ContactCreated { .. } => "contactCreated",
            ClientEvent::SendMessage { .. } => "sendMessage",
        }
    }

    /// Check the identity fields this event routes on.
    pub fn validate(&self) -> Result<()> {
        match self {
            ClientEvent::Identify { user } => user.validate(),
            ClientEvent::ContactCreated { sender, receiver } => {
                sender.validate()?;
                receiver.validate()
            }
            ClientEvent::SendMessage { sender, receiver, .. } => {
                sender.validate()?;
                receiver.validate()
            }
        }
    }
}

/// Outbound events (gateway -> client).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Presence snapshot, broadcast to every connection after any change.
    OnlineUsersChanged { users: Vec<OnlineUser> },
    /// Unicast to the receiver of a new contact.
    ContactCreated { sender: Identity },
    /// Unicast to the receiver of a relayed message.
    NewMessage {
        message: Value,
        sender: Identity,
        receiver: Identity,
    },
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::OnlineUsersChanged { .. } => "onlineUsersChanged",
            ServerEvent::ContactCreated { .. } => "contactCreated",
            ServerEvent::NewMessage { .. } => "newMessage",
        }
    }
}
