//! Protocol message types
//!
//! `ClientEvent` covers everything a participant can send; `ServerEvent`
//! covers everything the server emits. Room and connection identity are
//! carried in payloads / delivery context, never inferred from the socket
//! beyond the connection id the transport assigns.

use serde::{Deserialize, Serialize};

use crate::registry::Member;

/// Inbound event from a participant
///
/// `ConnectionClosed` is synthesized by the transport when a socket drops;
/// it is part of the closed enum so disconnection flows through the same
/// transition table as wire events, but it is never parsed off the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ClientEvent {
    /// Join a room, creating it if it doesn't exist yet
    JoinRoom { room_id: String, name: String },
    /// Chat relay; never touches room state
    SendMessage {
        room_id: String,
        username: String,
        message: String,
    },
    /// Switch the room to a new media URL
    ChangeVideo { room_id: String, url: String },
    /// Resume playback
    Play { room_id: String },
    /// Pause playback
    Pause { room_id: String },
    /// Periodic authoritative time report (leader only)
    TimeUpdate { room_id: String, current_time: f64 },
    /// Reply to a request-current-time / request-sync prompt
    RespondCurrentTime { room_id: String, current_time: f64 },
    /// Ask the room to re-emit the current playhead (leader only)
    RequestSync { room_id: String },
    /// Jump to an absolute position (any participant)
    Seek { room_id: String, time: f64 },
    /// Socket closed; synthesized by the transport
    ConnectionClosed,
}

/// Outbound event to one or more participants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "event",
    content = "data",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase"
)]
pub enum ServerEvent {
    /// Current member list of a room, in join order
    UpdateMembers { members: Vec<Member> },
    /// Media URL changed (or current URL, sent to a fresh joiner)
    ChangeVideo { url: String },
    /// Authoritative playhead position
    SyncTime { current_time: f64 },
    /// Playback resumed
    Play,
    /// Playback paused
    Pause,
    /// Directed at the leader: emit a sync for a joiner or stale follower
    RequestSync { room_id: String },
    /// Directed at the leader: report your exact current time
    RequestCurrentTime { room_id: String },
    /// Directed at a member that was just promoted to leader
    AssignedLeader,
    /// Relayed chat message
    ReceiveMessage { username: String, message: String },
}
