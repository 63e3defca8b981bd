//! Live connection table and WebSocket fan-out
//!
//! `ConnectionTable` maps connection ids to outbound message channels;
//! `WsBroadcaster` implements the coordinator's `Broadcaster` seam on top
//! of it. Each event is serialized once; the text frame's payload is
//! reference-counted, so per-recipient clones share the same allocation.
//!
//! Delivery is fire-and-forget: sends into closed channels are swallowed
//! here, never surfaced to the coordinator.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::Message;
use parking_lot::RwLock;
use tokio::sync::mpsc;

use crate::protocol::ServerEvent;
use crate::registry::{ConnectionId, Room};
use crate::sync::Broadcaster;

/// Outbound channel for one WebSocket connection
pub(crate) type OutboundSender = mpsc::UnboundedSender<Message>;

/// All currently connected participants
#[derive(Default)]
pub struct ConnectionTable {
    senders: RwLock<HashMap<ConnectionId, OutboundSender>>,
}

impl ConnectionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's outbound channel
    pub(crate) fn insert(&self, id: ConnectionId, sender: OutboundSender) {
        self.senders.write().insert(id, sender);
    }

    /// Remove a connection; idempotent
    pub(crate) fn remove(&self, id: ConnectionId) {
        self.senders.write().remove(&id);
    }

    /// Number of live connections
    pub fn len(&self) -> usize {
        self.senders.read().len()
    }

    /// Whether no connections exist
    pub fn is_empty(&self) -> bool {
        self.senders.read().is_empty()
    }

    fn send_to_each<'a>(
        &self,
        recipients: impl Iterator<Item = &'a ConnectionId>,
        message: &Message,
    ) {
        let senders = self.senders.read();
        for id in recipients {
            if let Some(tx) = senders.get(id) {
                // A failed send means the reader task already dropped the
                // receiver; the connection is on its way out
                let _ = tx.send(message.clone());
            }
        }
    }
}

/// `Broadcaster` implementation over live WebSocket connections
pub struct WsBroadcaster {
    connections: Arc<ConnectionTable>,
}

impl WsBroadcaster {
    /// Create a broadcaster over the given connection table
    pub fn new(connections: Arc<ConnectionTable>) -> Self {
        Self { connections }
    }
}

impl Broadcaster for WsBroadcaster {
    fn to_room(&self, room: &Room, event: &ServerEvent) {
        let Some(message) = encode(event) else { return };
        self.connections
            .send_to_each(room.members.iter().map(|m| &m.id), &message);
    }

    fn to_room_except(&self, room: &Room, sender: ConnectionId, event: &ServerEvent) {
        let Some(message) = encode(event) else { return };
        self.connections.send_to_each(
            room.members.iter().map(|m| &m.id).filter(|id| **id != sender),
            &message,
        );
    }

    fn to_member(&self, member: ConnectionId, event: &ServerEvent) {
        let Some(message) = encode(event) else { return };
        self.connections.send_to_each(std::iter::once(&member), &message);
    }
}

/// Serialize an event to a text frame; one serialization per broadcast
fn encode(event: &ServerEvent) -> Option<Message> {
    match serde_json::to_string(event) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize outbound event");
            None
        }
    }
}
