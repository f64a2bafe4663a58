//! sensord-web — the push channel dashboards connect to.
//!
//! One route matters: `GET /ws` upgrades to a WebSocket, registers the
//! client with the shared [`SubscriberRegistry`], and forwards every frame
//! published after the connect. Serving the dashboard's static assets and
//! any auxiliary HTTP routes is the deployment's concern (a reverse proxy
//! or a separate static server), not this crate's.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use futures::StreamExt;

use sensord_core::SubscriberRegistry;

/// Build the router. Split from [`serve`] so it can be driven in-process.
pub fn app(registry: Arc<SubscriberRegistry>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(registry)
}

/// Bind the push channel and serve until ctrl-c.
pub async fn serve(registry: Arc<SubscriberRegistry>, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dashboard push channel listening");

    axum::serve(listener, app(registry))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(registry): State<Arc<SubscriberRegistry>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, registry))
}

/// Pump published frames to one client until either side hangs up.
///
/// The subscriber exists exactly as long as the socket: registered on
/// upgrade, removed on any exit path, so the registry only ever holds live
/// connections.
async fn handle_socket(mut socket: WebSocket, registry: Arc<SubscriberRegistry>) {
    let (id, mut frames) = registry.subscribe();
    tracing::debug!(%id, clients = registry.subscriber_count(), "dashboard connected");

    loop {
        tokio::select! {
            // Inbound traffic only matters for detecting the close.
            inbound = socket.next() => match inbound {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            frame = frames.recv() => match frame {
                Some(text) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                // Registry dropped — the process is shutting down.
                None => break,
            },
        }
    }

    registry.unsubscribe(id);
    tracing::debug!(%id, clients = registry.subscriber_count(), "dashboard disconnected");
}
