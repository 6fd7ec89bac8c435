//! Realtime core components.
//!
//! Presence registry (who is online, on which connection), the event relay
//! that forwards point-to-point events, and the per-connection session state
//! machine.

mod registry;
mod relay;
mod session;

pub use registry::{Connection, PresenceRegistry};
pub use relay::{relay_drop_count, relay_send_fail_count, EventRelay};
pub use session::Session;
