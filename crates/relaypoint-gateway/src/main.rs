//! relaypoint gateway binary.
//!
//! - WebSocket endpoint: /v1/ws
//! - Presence registry + point-to-point event relay
//! - Tracing span per connection, heartbeat ping + idle timeout

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use relaypoint_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path =
        std::env::var("RELAYPOINT_CONFIG").unwrap_or_else(|_| "relaypoint.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    tracing::info!(%listen, "relaypoint-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
