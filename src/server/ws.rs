//! Per-connection WebSocket handling
//!
//! Each socket gets a connection id, an entry in the connection table, and
//! a writer task draining its outbound channel. Inbound text frames are
//! parsed into `ClientEvent` and handed to the coordinator; anything
//! unparseable is ignored. Every exit path synthesizes `ConnectionClosed`
//! so departure flows through the same transition table as wire events.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::sink::SinkExt;
use futures::stream::StreamExt;
use tokio::sync::mpsc;

use crate::protocol::ClientEvent;
use crate::registry::ConnectionId;

use super::listener::AppState;

/// WebSocket upgrade handler
pub(crate) async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    // Check connection limit before upgrading; the permit rides along for
    // the connection's lifetime
    let permit = match &state.limit {
        Some(sem) => match sem.clone().try_acquire_owned() {
            Ok(permit) => Some(permit),
            Err(_) => {
                tracing::warn!("Connection rejected: limit reached");
                return StatusCode::SERVICE_UNAVAILABLE.into_response();
            }
        },
        None => None,
    };

    ws.on_upgrade(move |socket| async move {
        let _permit = permit;
        handle_socket(socket, state).await;
    })
    .into_response()
}

/// Main connection loop
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = state.allocate_connection_id();
    let (mut sink, mut stream) = socket.split();

    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    state.connections.insert(conn_id, tx);

    tracing::debug!(connection = %conn_id, "WebSocket connected");

    // Writer task: drains the outbound channel so broadcasts never block
    // the coordinator on a slow socket
    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                // Departure is synthesized by this transport, never taken
                // off the wire
                Ok(ClientEvent::ConnectionClosed) => {
                    tracing::debug!(connection = %conn_id, "Ignoring connection-closed from wire");
                }
                Ok(event) => state.coordinator.apply(conn_id, event).await,
                Err(e) => {
                    tracing::debug!(connection = %conn_id, error = %e, "Ignoring unparseable frame");
                }
            },
            Message::Close(_) => break,
            // Pings are answered by axum; binary frames have no meaning here
            _ => {}
        }
    }

    // Unregister first so the departure broadcasts skip this connection
    state.connections.remove(conn_id);
    state
        .coordinator
        .apply(conn_id, ClientEvent::ConnectionClosed)
        .await;
    writer.abort();

    tracing::debug!(connection = %conn_id, "WebSocket closed");
}

impl AppState {
    pub(crate) fn allocate_connection_id(&self) -> ConnectionId {
        use std::sync::atomic::Ordering;
        ConnectionId::new(self.next_connection_id.fetch_add(1, Ordering::Relaxed))
    }
}
