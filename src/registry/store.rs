//! Room registry implementation
//!
//! Process-wide map of room id to room. Rooms are created lazily on first
//! join and removed the instant they empty; nothing here is persisted.
//!
//! The registry is a plain map with no interior locking: the coordinator
//! wraps it in a single mutex and runs each event's full transition under
//! it, which is what keeps room mutations atomic (see `sync::coordinator`).

use std::collections::HashMap;

use super::room::Room;

/// Registry of all live rooms
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<String, Room>,
}

impl RoomRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a room, creating an empty one if the id is unseen
    ///
    /// Creation is not an event of its own; it is observable only through
    /// later queries.
    pub fn get_or_create(&mut self, room_id: &str) -> &mut Room {
        self.rooms.entry(room_id.to_string()).or_insert_with(|| {
            tracing::info!(room = %room_id, "Room created");
            Room::new(room_id)
        })
    }

    /// Look up a room by id
    pub fn get(&self, room_id: &str) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    /// Look up a room by id, mutably
    pub fn get_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    /// Remove a room iff it has no members; idempotent
    ///
    /// Returns `true` if a room was removed.
    pub fn remove_if_empty(&mut self, room_id: &str) -> bool {
        match self.rooms.get(room_id) {
            Some(room) if room.is_empty() => {
                self.rooms.remove(room_id);
                tracing::info!(room = %room_id, "Room removed (empty)");
                true
            }
            _ => false,
        }
    }

    /// Ids of all live rooms
    pub fn room_ids(&self) -> Vec<String> {
        self.rooms.keys().cloned().collect()
    }

    /// Number of live rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no rooms exist
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::room::{ConnectionId, Member};

    #[test]
    fn test_get_or_create_is_lazy() {
        let mut registry = RoomRegistry::new();
        assert!(registry.get("R1").is_none());

        let room = registry.get_or_create("R1");
        assert_eq!(room.id, "R1");
        assert!(room.is_empty());
        assert_eq!(room.media_url, "");
        assert_eq!(room.playhead_seconds, 0.0);
        assert!(!room.is_playing);
        assert_eq!(room.leader_id, None);

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut registry = RoomRegistry::new();
        registry
            .get_or_create("R1")
            .add_member(Member::new(ConnectionId::new(1), "Alice"));

        // Second call returns the same room, not a fresh one
        assert_eq!(registry.get_or_create("R1").member_count(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_if_empty_keeps_occupied_rooms() {
        let mut registry = RoomRegistry::new();
        registry
            .get_or_create("R1")
            .add_member(Member::new(ConnectionId::new(1), "Alice"));

        assert!(!registry.remove_if_empty("R1"));
        assert!(registry.get("R1").is_some());

        registry
            .get_mut("R1")
            .unwrap()
            .remove_member(ConnectionId::new(1));

        assert!(registry.remove_if_empty("R1"));
        assert!(registry.get("R1").is_none());
    }

    #[test]
    fn test_remove_if_empty_unknown_room_is_noop() {
        let mut registry = RoomRegistry::new();
        assert!(!registry.remove_if_empty("nope"));
    }
}
