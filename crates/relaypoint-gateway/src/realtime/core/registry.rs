use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc;

use std::sync::atomic::{AtomicU64, Ordering};

use relaypoint_core::protocol::events::{Identity, OnlineUser};

/// One connection's outbound queue sender.
#[derive(Clone)]
pub struct Connection {
    pub tx: mpsc::Sender<Message>,
}

#[derive(Clone)]
struct OnlineEntry {
    user: Identity,
    connection_id: String,
    seq: u64,
}

/// Presence registry:
/// - `connection_id -> Connection` for every live socket (anonymous included)
/// - `user_id -> OnlineEntry` for identified users
///
/// Sole owner of the online-user mapping; at most one connection per user
/// (duplicate registration is a no-op, the first connection stays the
/// delivery target).
#[derive(Default)]
pub struct PresenceRegistry {
    connections: DashMap<String, Connection>,
    online: DashMap<String, OnlineEntry>,
    conn_seq: AtomicU64,
    order_seq: AtomicU64,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            online: DashMap::new(),
            conn_seq: AtomicU64::new(1),
            order_seq: AtomicU64::new(1),
        }
    }

    /// Attach a transport connection and mint its identifier.
    pub fn attach(&self, conn: Connection) -> String {
        let id = format!("conn-{}", self.conn_seq.fetch_add(1, Ordering::Relaxed));
        self.connections.insert(id.clone(), conn);
        id
    }

    /// Drop a transport connection. No-op on unknown ids.
    pub fn detach(&self, connection_id: &str) -> Option<Connection> {
        self.connections
            .remove(connection_id)
            .map(|(_, conn)| conn)
    }

    /// Mark a user online on `connection_id`.
    ///
    /// Returns `false` when the user is already online; the existing entry is
    /// left untouched. The entry API makes the check-and-insert atomic with
    /// respect to concurrent registrations for the same user.
    pub fn register(&self, user: Identity, connection_id: &str) -> bool {
        let mut inserted = false;
        self.online.entry(user.user_id.clone()).or_insert_with(|| {
            inserted = true;
            OnlineEntry {
                user,
                connection_id: connection_id.to_string(),
                seq: self.order_seq.fetch_add(1, Ordering::Relaxed),
            }
        });
        inserted
    }

    /// Remove every online entry bound to `connection_id`.
    ///
    /// Disconnect is rare, so a retain scan over the online table beats
    /// maintaining a reverse index. Returns whether anything was removed;
    /// unknown ids are a benign no-op.
    pub fn unregister(&self, connection_id: &str) -> bool {
        let before = self.online.len();
        self.online.retain(|_, e| e.connection_id != connection_id);
        self.online.len() != before
    }

    /// Current delivery target for a user, or `None` when offline.
    pub fn lookup_connection(&self, user_id: &str) -> Option<String> {
        self.online.get(user_id).map(|e| e.connection_id.clone())
    }

    /// Snapshot of online users, ordered by registration sequence.
    pub fn list_all(&self) -> Vec<OnlineUser> {
        let mut entries: Vec<OnlineEntry> =
            self.online.iter().map(|r| r.value().clone()).collect();
        entries.sort_by_key(|e| e.seq);
        entries
            .into_iter()
            .map(|e| OnlineUser {
                user: e.user,
                connection_id: e.connection_id,
            })
            .collect()
    }

    pub fn connection(&self, connection_id: &str) -> Option<Connection> {
        self.connections
            .get(connection_id)
            .map(|r| r.value().clone())
    }

    /// Every live connection, identified or not (presence broadcast audience).
    pub fn connections(&self) -> Vec<Connection> {
        self.connections.iter().map(|r| r.value().clone()).collect()
    }

    pub fn online_count(&self) -> usize {
        self.online.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
