use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::ws::Message;
use serde_json::Value;
use tokio::sync::mpsc::error::TrySendError;

use relaypoint_core::error::Result;
use relaypoint_core::protocol::events::{Identity, ServerEvent};

use crate::realtime::core::registry::{Connection, PresenceRegistry};
use crate::realtime::types::PreparedEvent;

static RELAY_DROPPED: AtomicU64 = AtomicU64::new(0);
static RELAY_SEND_FAILED: AtomicU64 = AtomicU64::new(0);

/// Events dropped because a receiver's outbound queue was full.
pub fn relay_drop_count() -> u64 {
    RELAY_DROPPED.load(Ordering::Relaxed)
}

/// Sends that failed because the receiver's channel had closed.
pub fn relay_send_fail_count() -> u64 {
    RELAY_SEND_FAILED.load(Ordering::Relaxed)
}

/// Event relay: resolves receivers through the registry and forwards events.
///
/// Holds no state of its own; every send is fire-and-forget `try_send`.
/// Offline receivers are a silent skip, failed sends are logged and counted
/// but never surface to the sender.
pub struct EventRelay {
    registry: Arc<PresenceRegistry>,
}

impl EventRelay {
    pub fn new(registry: Arc<PresenceRegistry>) -> Self {
        Self { registry }
    }

    /// Unicast a "contact created" notification to the receiver, if online.
    pub fn relay_contact_created(&self, sender: Identity, receiver: &Identity) -> Result<()> {
        let Some(connection_id) = self.registry.lookup_connection(&receiver.user_id) else {
            tracing::debug!(user = %receiver.user_id, "receiver offline, dropping contactCreated");
            return Ok(());
        };
        let prepared = PreparedEvent::prepare(&ServerEvent::ContactCreated { sender })?;
        self.unicast(&connection_id, &prepared);
        Ok(())
    }

    /// Unicast a relayed message to the receiver, if online.
    pub fn relay_message(&self, message: Value, sender: Identity, receiver: Identity) -> Result<()> {
        let Some(connection_id) = self.registry.lookup_connection(&receiver.user_id) else {
            tracing::debug!(user = %receiver.user_id, "receiver offline, dropping message");
            return Ok(());
        };
        let prepared = PreparedEvent::prepare(&ServerEvent::NewMessage {
            message,
            sender,
            receiver,
        })?;
        self.unicast(&connection_id, &prepared);
        Ok(())
    }

    /// Send the full presence snapshot to every live connection.
    pub fn broadcast_presence(&self) -> Result<()> {
        let prepared = PreparedEvent::prepare(&ServerEvent::OnlineUsersChanged {
            users: self.registry.list_all(),
        })?;
        for conn in self.registry.connections() {
            try_send(&conn, prepared.to_ws_message());
        }
        Ok(())
    }

    fn unicast(&self, connection_id: &str, prepared: &PreparedEvent) {
        match self.registry.connection(connection_id) {
            Some(conn) => try_send(&conn, prepared.to_ws_message()),
            None => {
                // Online entry points at a connection already gone; the
                // disconnect path will clean the entry up.
                RELAY_SEND_FAILED.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(%connection_id, "online entry without live connection");
            }
        }
    }
}

fn try_send(conn: &Connection, msg: Message) {
    match conn.tx.try_send(msg) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            RELAY_DROPPED.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("outbound queue full, dropping event");
        }
        Err(TrySendError::Closed(_)) => {
            RELAY_SEND_FAILED.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("outbound channel closed, dropping event");
        }
    }
}
