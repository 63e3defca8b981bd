//! Broadcast seam between the coordinator and the transport
//!
//! The coordinator decides *who* hears an event; the transport decides *how*
//! it gets there. Implementations must be fire-and-forget: they never block
//! a state transition, and delivery failure to an individual member (for
//! example a socket that already closed) is swallowed at the transport
//! boundary, never surfaced to the coordinator.

use crate::protocol::ServerEvent;
use crate::registry::{ConnectionId, Room};

/// Fan-out abstraction consumed by the sync coordinator
///
/// Methods take the room by reference so the transport never has to mirror
/// membership state; the coordinator is the single owner of who is in a
/// room.
pub trait Broadcaster: Send + Sync {
    /// Deliver to every current member of the room
    fn to_room(&self, room: &Room, event: &ServerEvent);

    /// Deliver to every member of the room except the sender
    fn to_room_except(&self, room: &Room, sender: ConnectionId, event: &ServerEvent);

    /// Deliver to exactly one participant
    fn to_member(&self, member: ConnectionId, event: &ServerEvent);
}
