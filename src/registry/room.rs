//! Room and member data model
//!
//! A `Room` owns its members in join order plus the shared playback state
//! (media URL, playhead, play/pause flag, current leader). All mutation
//! goes through the sync coordinator, which serializes transitions.

use serde::{Deserialize, Serialize};

/// Opaque identifier for one connected participant
///
/// Allocated by the transport from a monotonic counter; unique for the
/// lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Create a connection id from a raw counter value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw counter value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One connected participant of a room
///
/// Created on join, immutable, removed on departure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Connection identifier
    pub id: ConnectionId,
    /// Display name given at join time
    pub username: String,
}

impl Member {
    /// Create a new member
    pub fn new(id: ConnectionId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

/// A group of participants sharing one playback timeline
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Room identifier
    pub id: String,

    /// Members in join order; the first member is the promotion candidate
    /// when the leader departs
    pub members: Vec<Member>,

    /// Current media URL; empty means no media selected yet
    pub media_url: String,

    /// Agreed playback position in seconds, never negative
    pub playhead_seconds: f64,

    /// Whether the room is currently playing
    pub is_playing: bool,

    /// Current leader, if any; always one of `members` when present
    pub leader_id: Option<ConnectionId>,
}

impl Room {
    /// Create an empty room: no media, playhead 0, paused, leaderless
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            members: Vec::new(),
            media_url: String::new(),
            playhead_seconds: 0.0,
            is_playing: false,
            leader_id: None,
        }
    }

    /// Append a member in join order
    ///
    /// A leaderless room hands leadership to the new member. Returns `true`
    /// if the member became leader.
    pub fn add_member(&mut self, member: Member) -> bool {
        let id = member.id;
        self.members.push(member);

        if self.leader_id.is_none() {
            self.leader_id = Some(id);
            true
        } else {
            false
        }
    }

    /// Remove a member by connection id
    ///
    /// Returns `true` if the member was present. Leadership is intentionally
    /// left dangling here; the caller decides between promotion and room
    /// teardown based on the remaining members.
    pub fn remove_member(&mut self, id: ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        self.members.len() != before
    }

    /// Promote the first remaining member (earliest joiner) to leader
    ///
    /// Returns the new leader's id, or `None` if the room is empty.
    pub fn promote_leader(&mut self) -> Option<ConnectionId> {
        self.leader_id = self.members.first().map(|m| m.id);
        self.leader_id
    }

    /// Switch media: new URL, playhead back to 0, paused
    pub fn reset_media(&mut self, url: impl Into<String>) {
        self.media_url = url.into();
        self.playhead_seconds = 0.0;
        self.is_playing = false;
    }

    /// Whether the given connection is the current leader
    pub fn is_leader(&self, id: ConnectionId) -> bool {
        self.leader_id == Some(id)
    }

    /// Whether the given connection is a member of this room
    pub fn has_member(&self, id: ConnectionId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Whether the room has no members left
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of members
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
