//! WebSocket handler.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS (after the Origin allowlist check)
//! - Attach the connection to the presence registry, mint its id
//! - Lifecycle: ping/pong + idle timeout
//! - Decode-once then route events into the session state machine
//! - On disconnect (any path), drive the session's terminal transition

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

use crate::app_state::AppState;
use crate::realtime::core::{Connection, Session};
use crate::transport::codec::{decode, Inbound};

pub async fn ws_upgrade(
    State(app): State<AppState>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    let origin = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok());
    if !app.cfg().gateway.origin_allowed(origin) {
        tracing::warn!(origin = origin.unwrap_or("<none>"), "handshake origin rejected");
        return (StatusCode::FORBIDDEN, "origin not allowed").into_response();
    }

    ws.on_upgrade(move |socket| run_session(app, socket))
        .into_response()
}

async fn run_session(app: AppState, socket: WebSocket) {
    let gw = &app.cfg().gateway;
    let ping_every = Duration::from_millis(gw.ping_interval_ms);
    let idle_timeout = Duration::from_millis(gw.idle_timeout_ms);

    // ---- outbound channel
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(gw.send_queue_depth);

    // ---- split socket
    let (mut ws_tx, mut ws_rx) = socket.split();

    // ---- attach to the registry, start Anonymous
    let connection_id = app.registry().attach(Connection { tx: out_tx.clone() });
    tracing::info!(%connection_id, "connection attached");

    let mut session = Session::new(connection_id.clone(), app.registry(), app.relay());
    let mut last_activity = Instant::now();

    let mut ping_tick = tokio::time::interval(ping_every);
    ping_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(m) => {
                        if ws_tx.send(m).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let Ok(msg) = incoming else { break; };

                last_activity = Instant::now();

                match decode(msg) {
                    Ok(Inbound::Event(ev)) => {
                        let name = ev.name();
                        if let Err(e) = session.handle_event(ev) {
                            // per-event fault only; the session survives
                            tracing::warn!(%connection_id, event = name, error = %e, "event handling failed");
                        }
                    }
                    Ok(Inbound::Ping(payload)) => {
                        let _ = out_tx.send(Message::Pong(payload)).await;
                    }
                    Ok(Inbound::Pong) => {}
                    Ok(Inbound::Close) => break,
                    Err(e) => {
                        tracing::warn!(%connection_id, error = %e, "dropping malformed frame");
                    }
                }
            }

            // ping
            _ = ping_tick.tick() => {
                let _ = out_tx.send(Message::Ping(Vec::new())).await;
            }

            // idle timeout
            _ = tokio::time::sleep(Duration::from_millis(250)) => {
                if last_activity.elapsed() >= idle_timeout {
                    tracing::info!(%connection_id, "idle timeout");
                    break;
                }
            }
        }
    }

    tracing::info!(%connection_id, user = session.user_id().unwrap_or("<anonymous>"), "connection closed");
    session.close();
}
