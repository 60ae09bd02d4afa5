//! WebSocket upgrade handler for live change notifications.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Validate the `Origin` header against the allow-list
//! 2. Upgrade to WebSocket and register the connection
//! 3. Send `connected`
//! 4. Forward queued events; answer `join` and `ping` until disconnect
//! 5. Remove the connection and its group memberships

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use futures::{SinkExt, StreamExt};

use crate::adapters::http::ErrorResponse;

use super::hub::TransportHandle;
use super::messages::{ClientMessage, ServerMessage};
use super::registry::{ConnectionId, ConnectionRegistry};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct RealtimeState {
    pub transport: TransportHandle,
}

impl RealtimeState {
    pub fn new(transport: TransportHandle) -> Self {
        Self { transport }
    }
}

/// Handle WebSocket upgrade requests.
///
/// A present `Origin` that the allow-list rejects gets a 403 and never
/// reaches the join loop. A missing `Origin` is allowed.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<RealtimeState>,
) -> Response {
    let origin = headers
        .get(header::ORIGIN)
        .map(|value| value.to_str().unwrap_or("<non-ascii>"));

    if let Err(err) = state.transport.authorize_origin(origin) {
        tracing::warn!(origin = origin.unwrap_or_default(), "websocket handshake rejected: {}", err);
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::forbidden("ORIGIN_NOT_ALLOWED", err.to_string())),
        )
            .into_response();
    }

    let registry = Arc::clone(state.transport.registry());
    ws.on_upgrade(move |socket| handle_socket(socket, registry))
}

/// Runs for the lifetime of one connection.
async fn handle_socket(socket: WebSocket, registry: Arc<ConnectionRegistry>) {
    let (mut sender, mut receiver) = socket.split();
    let (connection_id, mut outbound) = registry.connect().await;

    if let Err(e) = send_message(&mut sender, &ServerMessage::connected(connection_id)).await {
        tracing::debug!(connection_id = %connection_id, "Failed to send connected message: {}", e);
        registry.disconnect(connection_id).await;
        return;
    }

    // Drain the outbound queue into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            if let Err(e) = sender.send(Message::Text((*frame).clone())).await {
                tracing::debug!(connection_id = %connection_id, "Send error, closing connection: {}", e);
                break;
            }
        }
    });

    let recv_registry = Arc::clone(&registry);
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => {
                    handle_client_frame(&recv_registry, connection_id, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::warn!(connection_id = %connection_id, "Received unsupported binary message");
                    reply(
                        &recv_registry,
                        connection_id,
                        &ServerMessage::error("UNSUPPORTED_FRAME", "binary frames are not supported"),
                    )
                    .await;
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {}
                Ok(Message::Close(_)) => {
                    tracing::debug!(connection_id = %connection_id, "Client sent close frame");
                    break;
                }
                Err(e) => {
                    tracing::debug!(connection_id = %connection_id, "Receive error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    registry.disconnect(connection_id).await;
}

async fn handle_client_frame(registry: &ConnectionRegistry, connection_id: ConnectionId, text: &str) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Join { group }) => {
            registry.join(connection_id, group).await;
        }
        Ok(ClientMessage::Ping) => {
            tracing::trace!(connection_id = %connection_id, "Received ping");
            reply(registry, connection_id, &ServerMessage::pong()).await;
        }
        Err(e) => {
            tracing::debug!(connection_id = %connection_id, "Invalid client message: {}", e);
            reply(
                registry,
                connection_id,
                &ServerMessage::error("INVALID_MESSAGE", e.to_string()),
            )
            .await;
        }
    }
}

/// Replies go through the same queue as events so the writer task stays the
/// only owner of the socket sink.
async fn reply(registry: &ConnectionRegistry, connection_id: ConnectionId, msg: &ServerMessage) {
    match serde_json::to_string(msg) {
        Ok(json) => {
            registry.send_to(connection_id, Arc::new(json)).await;
        }
        Err(e) => tracing::warn!("Failed to serialize reply: {}", e),
    }
}

async fn send_message(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}

/// Create axum router for the WebSocket endpoint at `path`.
pub fn realtime_router(path: &str) -> Router<RealtimeState> {
    Router::new().route(path, get(ws_handler))
}
