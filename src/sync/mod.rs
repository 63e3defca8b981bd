//! Leader-driven playback synchronization
//!
//! The coordinator is the protocol core: it applies inbound events to rooms
//! one at a time and fans resulting events out through the `Broadcaster`
//! seam. The transport lives entirely on the other side of that seam.
//!
//! ```text
//!   inbound event ──► SyncCoordinator ──► RoomRegistry mutation
//!   (conn id, tag)        │ (one mutex,
//!                         │  one exhaustive match)
//!                         ▼
//!                    Broadcaster
//!            to_room / to_room_except / to_member
//! ```

pub mod broadcast;
pub mod coordinator;

pub use broadcast::Broadcaster;
pub use coordinator::SyncCoordinator;
