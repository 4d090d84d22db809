//! Request and session handlers.
//!
//! A request to `/` carrying a WebSocket upgrade becomes a game session: its
//! frames are pumped between the socket and the lifecycle dispatcher until
//! the session ends. Every other request is answered from the static root.

use crate::{
    connection::ConnectionHandle,
    server::{lifecycle::ConnectionEvent, router::AppState, static_files::StaticContentServer},
};
use axum::extract::ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{ConnectInfo, State};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use futures::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

/// WebSocket sub-protocol carrying game traffic.
pub const GAME_PROTOCOL: &str = "game-protocol";

/// `GET /`: upgrades to a game session, or serves the client page.
///
/// The `game-protocol` sub-protocol is selected when the client offers it;
/// other offers are accepted without a selected sub-protocol.
pub async fn root_handler(
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> Response {
    match upgrade {
        Ok(ws) => ws
            .protocols([GAME_PROTOCOL])
            .on_upgrade(move |socket| handle_socket(socket, addr, state)),
        Err(_) => serve_static(&state.static_content, "/").await,
    }
}

/// Every path other than `/`: static files for GET, 405 otherwise.
pub async fn static_handler(method: Method, uri: Uri, State(state): State<AppState>) -> Response {
    if method != Method::GET {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::CONTENT_TYPE, "text/html")],
            "Method Not Allowed",
        )
            .into_response();
    }
    serve_static(&state.static_content, uri.path()).await
}

async fn serve_static(static_content: &StaticContentServer, path: &str) -> Response {
    match static_content.resolve(path).await {
        Ok(file) => ([(header::CONTENT_TYPE, file.content_type)], file.body).into_response(),
        Err(e) => {
            warn!("Failed to serve file {}: {}", path, e);
            (
                StatusCode::NOT_FOUND,
                [(header::CONTENT_TYPE, "text/html")],
                "Not Found",
            )
                .into_response()
        }
    }
}

/// Runs one game session from handshake to cleanup.
///
/// # Connection Flow
///
/// 1. Report `Connected` to the dispatcher
/// 2. Run the incoming and outgoing tasks until either ends
/// 3. Release the outbound queue and report `Disconnected`
///
/// The registry only holds a weak reference to the outbound queue, so once
/// this function returns nothing can write to the socket any more.
async fn handle_socket(socket: WebSocket, addr: SocketAddr, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();
    let connection_id = state.registry.next_connection_id();
    let events = state.events;

    if events
        .send(ConnectionEvent::Connected(ConnectionHandle::new(
            connection_id,
            addr,
            &outbound_tx,
        )))
        .is_err()
    {
        error!("Lifecycle dispatcher has stopped, dropping connection from {}", addr);
        return;
    }

    // Incoming message task - forwards choices to the dispatcher
    let incoming_task = async {
        while let Some(msg) = ws_receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let event = ConnectionEvent::Message {
                        connection_id,
                        payload: text.as_str().to_owned(),
                    };
                    if events.send(event).is_err() {
                        warn!("Lifecycle dispatcher gone, closing connection {}", connection_id);
                        break;
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("🔌 Client {} requested close", connection_id);
                    break;
                }
                Err(e) => {
                    error!("WebSocket error for connection {}: {}", connection_id, e);
                    break;
                }
                _ => {}
            }
        }
    };

    // Outgoing message task
    let outgoing_task = async move {
        while let Some(message) = outbound_rx.recv().await {
            if let Err(e) = ws_sender.send(message).await {
                error!("Failed to send message to connection {}: {}", connection_id, e);
                break;
            }
        }
    };

    tokio::select! {
        _ = incoming_task => {},
        _ = outgoing_task => {},
    }

    drop(outbound_tx);
    if events.send(ConnectionEvent::Disconnected { connection_id }).is_err() {
        debug!("Dispatcher already stopped when connection {} closed", connection_id);
    }
}
