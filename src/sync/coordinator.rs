//! Room synchronization state machine
//!
//! One `apply` call per inbound event, exhaustively matched, run start to
//! finish under a single mutex so no two transitions interleave. Room state
//! is therefore mutated atomically without per-room locking.
//!
//! Time authority is asymmetric by design: only the leader's periodic
//! `time-update` is trusted for drift correction, so followers can't fight
//! over the clock during normal playback, while `seek` and
//! `respond-current-time` are open to any participant because they are
//! explicit user-initiated corrections that must take effect immediately.
//!
//! Events that fail a precondition (unknown room, non-leader claiming time
//! authority, invalid numeric input) are dropped silently: races between
//! departure and in-flight events are expected and harmless, and followers
//! may legitimately run stale client logic. No transition is fatal.

use tokio::sync::Mutex;

use crate::protocol::{ClientEvent, ServerEvent};
use crate::registry::{ConnectionId, Member, Room, RoomRegistry};

use super::broadcast::Broadcaster;

/// Protocol logic over the room registry
///
/// Generic over the broadcast seam so the transport adapter (or a test
/// recorder) plugs in without dynamic dispatch.
pub struct SyncCoordinator<B> {
    rooms: Mutex<RoomRegistry>,
    broadcaster: B,
}

impl<B: Broadcaster> SyncCoordinator<B> {
    /// Create a coordinator with an empty registry
    pub fn new(broadcaster: B) -> Self {
        Self {
            rooms: Mutex::new(RoomRegistry::new()),
            broadcaster,
        }
    }

    /// Access the broadcaster
    pub fn broadcaster(&self) -> &B {
        &self.broadcaster
    }

    /// Apply one inbound event
    ///
    /// The full transition (validate, mutate, broadcast) runs under the
    /// registry lock; broadcasts are fire-and-forget so holding the lock
    /// across them cannot block.
    pub async fn apply(&self, sender: ConnectionId, event: ClientEvent) {
        let mut rooms = self.rooms.lock().await;

        match event {
            ClientEvent::JoinRoom { room_id, name } => {
                self.on_join(&mut rooms, sender, &room_id, name);
            }
            ClientEvent::ConnectionClosed => {
                self.on_disconnect(&mut rooms, sender);
            }
            ClientEvent::SendMessage {
                room_id,
                username,
                message,
            } => {
                if let Some(room) = room_or_drop(&mut rooms, &room_id, "send-message") {
                    // Pure relay; room state is untouched
                    self.broadcaster
                        .to_room(room, &ServerEvent::ReceiveMessage { username, message });
                }
            }
            ClientEvent::ChangeVideo { room_id, url } => {
                if let Some(room) = room_or_drop(&mut rooms, &room_id, "change-video") {
                    room.reset_media(url.clone());
                    tracing::info!(room = %room.id, url = %url, "Media changed");

                    self.broadcaster
                        .to_room(room, &ServerEvent::ChangeVideo { url });
                    self.broadcaster
                        .to_room(room, &ServerEvent::SyncTime { current_time: 0.0 });
                    self.broadcaster.to_room(room, &ServerEvent::Pause);
                }
            }
            ClientEvent::Play { room_id } => {
                if let Some(room) = room_or_drop(&mut rooms, &room_id, "play") {
                    room.is_playing = true;
                    self.broadcaster.to_room(room, &ServerEvent::Play);
                }
            }
            ClientEvent::Pause { room_id } => {
                if let Some(room) = room_or_drop(&mut rooms, &room_id, "pause") {
                    room.is_playing = false;
                    self.broadcaster.to_room(room, &ServerEvent::Pause);

                    // The leader pausing should pin the exact paused position,
                    // not whatever the last periodic report said
                    if room.is_leader(sender) {
                        self.broadcaster.to_member(
                            sender,
                            &ServerEvent::RequestCurrentTime {
                                room_id: room.id.clone(),
                            },
                        );
                    }
                }
            }
            ClientEvent::TimeUpdate {
                room_id,
                current_time,
            } => {
                let Some(room) = room_or_drop(&mut rooms, &room_id, "time-update") else {
                    return;
                };
                if !room.is_leader(sender) {
                    tracing::debug!(
                        room = %room.id,
                        sender = %sender,
                        "Dropping time-update from non-leader"
                    );
                    return;
                }
                if current_time <= 0.0 {
                    tracing::debug!(room = %room.id, time = current_time, "Dropping non-positive time-update");
                    return;
                }

                room.playhead_seconds = current_time;
                self.broadcaster
                    .to_room_except(room, sender, &ServerEvent::SyncTime { current_time });
            }
            ClientEvent::RespondCurrentTime {
                room_id,
                current_time,
            } => {
                let Some(room) = room_or_drop(&mut rooms, &room_id, "respond-current-time") else {
                    return;
                };
                if current_time <= 0.0 {
                    tracing::debug!(
                        room = %room.id,
                        time = current_time,
                        "Dropping non-positive respond-current-time"
                    );
                    return;
                }

                room.playhead_seconds = current_time;
                self.broadcaster
                    .to_room(room, &ServerEvent::SyncTime { current_time });
            }
            ClientEvent::RequestSync { room_id } => {
                let Some(room) = room_or_drop(&mut rooms, &room_id, "request-sync") else {
                    return;
                };
                if !room.is_leader(sender) {
                    tracing::debug!(
                        room = %room.id,
                        sender = %sender,
                        "Dropping request-sync from non-leader"
                    );
                    return;
                }

                // Read-only: re-emit the agreed playhead
                self.broadcaster.to_room(
                    room,
                    &ServerEvent::SyncTime {
                        current_time: room.playhead_seconds,
                    },
                );
            }
            ClientEvent::Seek { room_id, time } => {
                let Some(room) = room_or_drop(&mut rooms, &room_id, "seek") else {
                    return;
                };
                if time < 0.0 {
                    tracing::debug!(room = %room.id, time, "Dropping negative seek");
                    return;
                }

                room.playhead_seconds = time;
                self.broadcaster
                    .to_room(room, &ServerEvent::SyncTime { current_time: time });
            }
        }
    }

    fn on_join(&self, rooms: &mut RoomRegistry, sender: ConnectionId, room_id: &str, name: String) {
        let room = rooms.get_or_create(room_id);
        let prior_leader = room.leader_id;

        let became_leader = room.add_member(Member::new(sender, name));
        if became_leader {
            tracing::info!(room = %room.id, member = %sender, "First member is leader");
        }
        tracing::info!(
            room = %room.id,
            member = %sender,
            members = room.member_count(),
            "Member joined"
        );

        self.broadcaster.to_room(
            room,
            &ServerEvent::UpdateMembers {
                members: room.members.clone(),
            },
        );

        // Bring the joiner up to the room's current playback snapshot
        self.broadcaster.to_member(
            sender,
            &ServerEvent::ChangeVideo {
                url: room.media_url.clone(),
            },
        );
        self.broadcaster.to_member(
            sender,
            &ServerEvent::SyncTime {
                current_time: room.playhead_seconds,
            },
        );
        let playing_state = if room.is_playing {
            ServerEvent::Play
        } else {
            ServerEvent::Pause
        };
        self.broadcaster.to_member(sender, &playing_state);

        // An established leader gets prodded for a fresh playhead so the
        // joiner isn't stuck with a stale snapshot
        if let Some(leader) = prior_leader {
            if leader != sender {
                self.broadcaster.to_member(
                    leader,
                    &ServerEvent::RequestSync {
                        room_id: room.id.clone(),
                    },
                );
            }
        }
    }

    fn on_disconnect(&self, rooms: &mut RoomRegistry, sender: ConnectionId) {
        // A connection may sit in any number of rooms; sweep them all
        for room_id in rooms.room_ids() {
            let Some(room) = rooms.get_mut(&room_id) else {
                continue;
            };
            if !room.remove_member(sender) {
                continue;
            }

            let was_leader = room.leader_id == Some(sender);
            tracing::info!(
                room = %room.id,
                member = %sender,
                members = room.member_count(),
                "Member left"
            );

            if room.is_empty() {
                rooms.remove_if_empty(&room_id);
                continue;
            }

            // Re-point leadership before anything observes the room
            let new_leader = if was_leader { room.promote_leader() } else { None };

            self.broadcaster.to_room(
                room,
                &ServerEvent::UpdateMembers {
                    members: room.members.clone(),
                },
            );

            if let Some(new_leader) = new_leader {
                tracing::info!(room = %room.id, leader = %new_leader, "Leader promoted");
                self.broadcaster
                    .to_member(new_leader, &ServerEvent::AssignedLeader);
            }
        }
    }

    /// Snapshot of one room, if it exists
    pub async fn room(&self, room_id: &str) -> Option<Room> {
        self.rooms.lock().await.get(room_id).cloned()
    }

    /// Number of live rooms
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

fn room_or_drop<'a>(
    rooms: &'a mut RoomRegistry,
    room_id: &str,
    event: &'static str,
) -> Option<&'a mut Room> {
    let room = rooms.get_mut(room_id);
    if room.is_none() {
        tracing::debug!(room = %room_id, event, "Dropping event for unknown room");
    }
    room
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;

    /// Records every delivery with its resolved recipient set
    #[derive(Default)]
    struct RecordingBroadcaster {
        deliveries: StdMutex<Vec<(Vec<ConnectionId>, ServerEvent)>>,
    }

    impl RecordingBroadcaster {
        fn events_for(&self, id: ConnectionId) -> Vec<ServerEvent> {
            self.deliveries
                .lock()
                .unwrap()
                .iter()
                .filter(|(to, _)| to.contains(&id))
                .map(|(_, e)| e.clone())
                .collect()
        }

        fn all(&self) -> Vec<(Vec<ConnectionId>, ServerEvent)> {
            self.deliveries.lock().unwrap().clone()
        }

        fn clear(&self) {
            self.deliveries.lock().unwrap().clear();
        }
    }

    impl Broadcaster for RecordingBroadcaster {
        fn to_room(&self, room: &Room, event: &ServerEvent) {
            let to = room.members.iter().map(|m| m.id).collect();
            self.deliveries.lock().unwrap().push((to, event.clone()));
        }

        fn to_room_except(&self, room: &Room, sender: ConnectionId, event: &ServerEvent) {
            let to = room
                .members
                .iter()
                .map(|m| m.id)
                .filter(|id| *id != sender)
                .collect();
            self.deliveries.lock().unwrap().push((to, event.clone()));
        }

        fn to_member(&self, member: ConnectionId, event: &ServerEvent) {
            self.deliveries
                .lock()
                .unwrap()
                .push((vec![member], event.clone()));
        }
    }

    fn coordinator() -> SyncCoordinator<RecordingBroadcaster> {
        SyncCoordinator::new(RecordingBroadcaster::default())
    }

    fn conn(id: u64) -> ConnectionId {
        ConnectionId::new(id)
    }

    async fn join(c: &SyncCoordinator<RecordingBroadcaster>, id: u64, name: &str) {
        c.apply(
            conn(id),
            ClientEvent::JoinRoom {
                room_id: "R1".into(),
                name: name.into(),
            },
        )
        .await;
    }

    #[tokio::test]
    async fn test_first_joiner_leads_until_departure() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;
        join(&c, 3, "C").await;

        assert_eq!(c.room("R1").await.unwrap().leader_id, Some(conn(1)));

        c.apply(conn(1), ClientEvent::ConnectionClosed).await;
        assert_eq!(c.room("R1").await.unwrap().leader_id, Some(conn(2)));
    }

    #[tokio::test]
    async fn test_promotion_follows_join_order() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;
        join(&c, 3, "C").await;

        // B leaves first; A still leads, so C must come after B's slot
        c.apply(conn(2), ClientEvent::ConnectionClosed).await;
        assert_eq!(c.room("R1").await.unwrap().leader_id, Some(conn(1)));

        c.apply(conn(1), ClientEvent::ConnectionClosed).await;
        let room = c.room("R1").await.unwrap();
        assert_eq!(room.leader_id, Some(conn(3)));
        assert!(c
            .broadcaster()
            .events_for(conn(3))
            .contains(&ServerEvent::AssignedLeader));
    }

    #[tokio::test]
    async fn test_follower_departure_keeps_leader_silent() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;
        c.broadcaster().clear();

        c.apply(conn(2), ClientEvent::ConnectionClosed).await;

        let room = c.room("R1").await.unwrap();
        assert_eq!(room.leader_id, Some(conn(1)));
        assert!(!c
            .broadcaster()
            .events_for(conn(1))
            .contains(&ServerEvent::AssignedLeader));
    }

    #[tokio::test]
    async fn test_joiner_receives_playback_snapshot() {
        let c = coordinator();
        join(&c, 1, "A").await;
        c.apply(
            conn(1),
            ClientEvent::ChangeVideo {
                room_id: "R1".into(),
                url: "https://example.com/v.mp4".into(),
            },
        )
        .await;
        c.apply(conn(1), ClientEvent::Play { room_id: "R1".into() })
            .await;
        c.apply(
            conn(1),
            ClientEvent::TimeUpdate {
                room_id: "R1".into(),
                current_time: 12.0,
            },
        )
        .await;
        c.broadcaster().clear();

        join(&c, 2, "B").await;

        let to_b = c.broadcaster().events_for(conn(2));
        assert!(to_b.contains(&ServerEvent::ChangeVideo {
            url: "https://example.com/v.mp4".into()
        }));
        assert!(to_b.contains(&ServerEvent::SyncTime { current_time: 12.0 }));
        assert!(to_b.contains(&ServerEvent::Play));
    }

    #[tokio::test]
    async fn test_join_prods_established_leader_for_sync() {
        let c = coordinator();
        join(&c, 1, "A").await;

        // A's own join must not address a request-sync at A
        assert!(!c
            .broadcaster()
            .events_for(conn(1))
            .iter()
            .any(|e| matches!(e, ServerEvent::RequestSync { .. })));
        c.broadcaster().clear();

        join(&c, 2, "B").await;

        let request = ServerEvent::RequestSync {
            room_id: "R1".into(),
        };
        assert!(c.broadcaster().events_for(conn(1)).contains(&request));
        assert!(!c.broadcaster().events_for(conn(2)).contains(&request));
    }

    #[tokio::test]
    async fn test_change_video_resets_playback() {
        let c = coordinator();
        join(&c, 1, "A").await;
        c.apply(conn(1), ClientEvent::Play { room_id: "R1".into() })
            .await;
        c.apply(
            conn(1),
            ClientEvent::TimeUpdate {
                room_id: "R1".into(),
                current_time: 99.0,
            },
        )
        .await;
        c.broadcaster().clear();

        c.apply(
            conn(1),
            ClientEvent::ChangeVideo {
                room_id: "R1".into(),
                url: "https://example.com/next.mp4".into(),
            },
        )
        .await;

        let room = c.room("R1").await.unwrap();
        assert_eq!(room.media_url, "https://example.com/next.mp4");
        assert_eq!(room.playhead_seconds, 0.0);
        assert!(!room.is_playing);

        let to_a = c.broadcaster().events_for(conn(1));
        assert!(to_a.contains(&ServerEvent::ChangeVideo {
            url: "https://example.com/next.mp4".into()
        }));
        assert!(to_a.contains(&ServerEvent::SyncTime { current_time: 0.0 }));
        assert!(to_a.contains(&ServerEvent::Pause));
    }

    #[tokio::test]
    async fn test_time_update_from_follower_is_dropped() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;
        c.broadcaster().clear();

        c.apply(
            conn(2),
            ClientEvent::TimeUpdate {
                room_id: "R1".into(),
                current_time: 7.0,
            },
        )
        .await;

        assert_eq!(c.room("R1").await.unwrap().playhead_seconds, 0.0);
        assert!(c.broadcaster().all().is_empty());
    }

    #[tokio::test]
    async fn test_time_update_from_leader_excludes_sender() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;
        c.broadcaster().clear();

        c.apply(
            conn(1),
            ClientEvent::TimeUpdate {
                room_id: "R1".into(),
                current_time: 5.0,
            },
        )
        .await;

        assert_eq!(c.room("R1").await.unwrap().playhead_seconds, 5.0);
        let sync = ServerEvent::SyncTime { current_time: 5.0 };
        assert!(c.broadcaster().events_for(conn(2)).contains(&sync));
        assert!(!c.broadcaster().events_for(conn(1)).contains(&sync));
    }

    #[tokio::test]
    async fn test_non_positive_time_reports_are_dropped() {
        let c = coordinator();
        join(&c, 1, "A").await;
        c.broadcaster().clear();

        for t in [-3.0, 0.0] {
            c.apply(
                conn(1),
                ClientEvent::TimeUpdate {
                    room_id: "R1".into(),
                    current_time: t,
                },
            )
            .await;
            c.apply(
                conn(1),
                ClientEvent::RespondCurrentTime {
                    room_id: "R1".into(),
                    current_time: t,
                },
            )
            .await;
        }

        assert_eq!(c.room("R1").await.unwrap().playhead_seconds, 0.0);
        assert!(c.broadcaster().all().is_empty());
    }

    #[tokio::test]
    async fn test_seek_accepts_zero_rejects_negative() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;
        c.apply(
            conn(1),
            ClientEvent::Seek {
                room_id: "R1".into(),
                time: 30.0,
            },
        )
        .await;
        c.broadcaster().clear();

        // Negative seek from anyone leaves the playhead untouched
        c.apply(
            conn(2),
            ClientEvent::Seek {
                room_id: "R1".into(),
                time: -1.0,
            },
        )
        .await;
        assert_eq!(c.room("R1").await.unwrap().playhead_seconds, 30.0);
        assert!(c.broadcaster().all().is_empty());

        // Seek to zero is a valid jump-to-start, follower or not
        c.apply(
            conn(2),
            ClientEvent::Seek {
                room_id: "R1".into(),
                time: 0.0,
            },
        )
        .await;
        assert_eq!(c.room("R1").await.unwrap().playhead_seconds, 0.0);
    }

    #[tokio::test]
    async fn test_respond_current_time_open_to_any_member() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;
        c.broadcaster().clear();

        c.apply(
            conn(2),
            ClientEvent::RespondCurrentTime {
                room_id: "R1".into(),
                current_time: 17.5,
            },
        )
        .await;

        assert_eq!(c.room("R1").await.unwrap().playhead_seconds, 17.5);
        let sync = ServerEvent::SyncTime { current_time: 17.5 };
        assert!(c.broadcaster().events_for(conn(1)).contains(&sync));
        assert!(c.broadcaster().events_for(conn(2)).contains(&sync));
    }

    #[tokio::test]
    async fn test_request_sync_is_leader_only_and_read_only() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;
        c.apply(
            conn(1),
            ClientEvent::Seek {
                room_id: "R1".into(),
                time: 8.0,
            },
        )
        .await;
        c.broadcaster().clear();

        c.apply(conn(2), ClientEvent::RequestSync { room_id: "R1".into() })
            .await;
        assert!(c.broadcaster().all().is_empty());

        c.apply(conn(1), ClientEvent::RequestSync { room_id: "R1".into() })
            .await;
        let sync = ServerEvent::SyncTime { current_time: 8.0 };
        assert!(c.broadcaster().events_for(conn(2)).contains(&sync));
        assert_eq!(c.room("R1").await.unwrap().playhead_seconds, 8.0);
    }

    #[tokio::test]
    async fn test_leader_pause_requests_exact_time() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;
        c.apply(conn(1), ClientEvent::Play { room_id: "R1".into() })
            .await;
        c.broadcaster().clear();

        c.apply(conn(1), ClientEvent::Pause { room_id: "R1".into() })
            .await;

        let room = c.room("R1").await.unwrap();
        assert!(!room.is_playing);
        assert!(c
            .broadcaster()
            .events_for(conn(1))
            .contains(&ServerEvent::RequestCurrentTime {
                room_id: "R1".into()
            }));

        // A follower pausing must not trigger the report request
        c.broadcaster().clear();
        c.apply(conn(2), ClientEvent::Pause { room_id: "R1".into() })
            .await;
        assert!(!c
            .broadcaster()
            .all()
            .iter()
            .any(|(_, e)| matches!(e, ServerEvent::RequestCurrentTime { .. })));
    }

    #[tokio::test]
    async fn test_events_for_unknown_room_are_dropped() {
        let c = coordinator();

        c.apply(conn(1), ClientEvent::Play { room_id: "ghost".into() })
            .await;
        c.apply(
            conn(1),
            ClientEvent::Seek {
                room_id: "ghost".into(),
                time: 3.0,
            },
        )
        .await;
        c.apply(
            conn(1),
            ClientEvent::SendMessage {
                room_id: "ghost".into(),
                username: "A".into(),
                message: "anyone?".into(),
            },
        )
        .await;

        // Nothing broadcast, and crucially no room sprang into existence
        assert!(c.broadcaster().all().is_empty());
        assert_eq!(c.room_count().await, 0);
    }

    #[tokio::test]
    async fn test_chat_relays_without_touching_state() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;
        let before = c.room("R1").await.unwrap();
        c.broadcaster().clear();

        c.apply(
            conn(1),
            ClientEvent::SendMessage {
                room_id: "R1".into(),
                username: "A".into(),
                message: "hello".into(),
            },
        )
        .await;

        assert_eq!(c.room("R1").await.unwrap(), before);
        let msg = ServerEvent::ReceiveMessage {
            username: "A".into(),
            message: "hello".into(),
        };
        assert!(c.broadcaster().events_for(conn(1)).contains(&msg));
        assert!(c.broadcaster().events_for(conn(2)).contains(&msg));
    }

    #[tokio::test]
    async fn test_room_removed_exactly_when_emptied() {
        let c = coordinator();
        join(&c, 1, "A").await;
        join(&c, 2, "B").await;

        c.apply(conn(1), ClientEvent::ConnectionClosed).await;
        assert_eq!(c.room_count().await, 1);

        c.apply(conn(2), ClientEvent::ConnectionClosed).await;
        assert_eq!(c.room_count().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_sweeps_every_room() {
        let c = coordinator();
        for room in ["R1", "R2"] {
            c.apply(
                conn(1),
                ClientEvent::JoinRoom {
                    room_id: room.into(),
                    name: "A".into(),
                },
            )
            .await;
        }
        c.apply(
            conn(2),
            ClientEvent::JoinRoom {
                room_id: "R2".into(),
                name: "B".into(),
            },
        )
        .await;

        c.apply(conn(1), ClientEvent::ConnectionClosed).await;

        assert!(c.room("R1").await.is_none());
        let r2 = c.room("R2").await.unwrap();
        assert_eq!(r2.member_count(), 1);
        assert_eq!(r2.leader_id, Some(conn(2)));
    }

    /// The full scripted lifecycle: join, resync handshake, leader report,
    /// rejected seek, promotion, teardown.
    #[tokio::test]
    async fn test_room_lifecycle_end_to_end() {
        let c = coordinator();

        join(&c, 1, "A").await;
        let room = c.room("R1").await.unwrap();
        assert_eq!(room.leader_id, Some(conn(1)));
        assert_eq!(room.member_count(), 1);

        c.broadcaster().clear();
        join(&c, 2, "B").await;
        let room = c.room("R1").await.unwrap();
        assert_eq!(room.leader_id, Some(conn(1)));
        assert_eq!(room.member_count(), 2);
        assert!(c
            .broadcaster()
            .events_for(conn(1))
            .contains(&ServerEvent::RequestSync {
                room_id: "R1".into()
            }));

        c.broadcaster().clear();
        c.apply(
            conn(1),
            ClientEvent::TimeUpdate {
                room_id: "R1".into(),
                current_time: 5.0,
            },
        )
        .await;
        assert_eq!(c.room("R1").await.unwrap().playhead_seconds, 5.0);
        let sync = ServerEvent::SyncTime { current_time: 5.0 };
        assert!(c.broadcaster().events_for(conn(2)).contains(&sync));
        assert!(!c.broadcaster().events_for(conn(1)).contains(&sync));

        c.apply(
            conn(2),
            ClientEvent::Seek {
                room_id: "R1".into(),
                time: -1.0,
            },
        )
        .await;
        assert_eq!(c.room("R1").await.unwrap().playhead_seconds, 5.0);

        c.broadcaster().clear();
        c.apply(conn(1), ClientEvent::ConnectionClosed).await;
        let room = c.room("R1").await.unwrap();
        assert_eq!(room.leader_id, Some(conn(2)));
        assert_eq!(room.member_count(), 1);
        assert!(c
            .broadcaster()
            .events_for(conn(2))
            .contains(&ServerEvent::AssignedLeader));

        c.apply(conn(2), ClientEvent::ConnectionClosed).await;
        assert_eq!(c.room_count().await, 0);
    }
}
