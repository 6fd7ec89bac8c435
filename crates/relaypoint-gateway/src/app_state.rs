//! Shared application state for the relaypoint gateway.
//!
//! The registry and relay are constructed fresh per `AppState`, so each
//! process (and each test) gets its own presence world.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::realtime::core::{EventRelay, PresenceRegistry};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    registry: Arc<PresenceRegistry>,
    relay: Arc<EventRelay>,
}

impl AppState {
    pub fn new(cfg: GatewayConfig) -> Self {
        let registry = Arc::new(PresenceRegistry::new());
        let relay = Arc::new(EventRelay::new(Arc::clone(&registry)));
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                relay,
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<PresenceRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn relay(&self) -> Arc<EventRelay> {
        Arc::clone(&self.inner.relay)
    }
}
