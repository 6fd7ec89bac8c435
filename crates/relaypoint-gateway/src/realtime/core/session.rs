use std::sync::Arc;

use relaypoint_core::error::Result;
use relaypoint_core::protocol::events::ClientEvent;

use crate::realtime::core::registry::PresenceRegistry;
use crate::realtime::core::relay::EventRelay;

/// Lifecycle of one transport connection.
///
/// A session starts Anonymous and becomes Identified when the client
/// announces an identity; there is no way back. `close` is the terminal
/// transition, after which the session object is discarded with the socket.
pub struct Session {
    connection_id: String,
    user_id: Option<String>,
    registry: Arc<PresenceRegistry>,
    relay: Arc<EventRelay>,
}

impl Session {
    pub fn new(
        connection_id: String,
        registry: Arc<PresenceRegistry>,
        relay: Arc<EventRelay>,
    ) -> Self {
        Self {
            connection_id,
            user_id: None,
            registry,
            relay,
        }
    }

    pub fn connection_id(&self) -> &str {
        &self.connection_id
    }

    /// Announced user id, `None` while Anonymous.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Route one inbound event.
    ///
    /// Relay events are forwarded regardless of this session's own
    /// identification state; delivery keys only off the receiver.
    pub fn handle_event(&mut self, ev: ClientEvent) -> Result<()> {
        ev.validate()?;
        match ev {
            ClientEvent::Identify { user } => {
                let user_id = user.user_id.clone();
                if !self.registry.register(user, &self.connection_id) {
                    tracing::debug!(
                        user = %user_id,
                        connection = %self.connection_id,
                        "already online, keeping first connection"
                    );
                }
                self.user_id = Some(user_id);
                // snapshot goes out even when registration was a no-op
                self.relay.broadcast_presence()
            }
            ClientEvent::ContactCreated { sender, receiver } => {
                self.relay.relay_contact_created(sender, &receiver)
            }
            ClientEvent::SendMessage {
                message,
                sender,
                receiver,
            } => self.relay.relay_message(message, sender, receiver),
        }
    }

    /// Terminal transition on transport disconnect.
    ///
    /// Unregister is a benign no-op for sessions that never identified.
    pub fn close(self) {
        self.registry.detach(&self.connection_id);
        self.registry.unregister(&self.connection_id);
        if let Err(e) = self.relay.broadcast_presence() {
            tracing::warn!(connection = %self.connection_id, error = %e, "presence broadcast failed");
        }
    }
}
