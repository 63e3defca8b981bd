//! Room registry: lazy room lifecycle and the room data model
//!
//! Rooms exist exactly while they have members. The registry creates a room
//! on the first join to an unseen id and removes it the moment its last
//! member departs.
//!
//! ```text
//!                within SyncCoordinator's Mutex
//!              ┌────────────────────────────────┐
//!              │ RoomRegistry                   │
//!              │   rooms: HashMap<String, Room> │
//!              │     Room {                     │
//!              │       members (join order),    │
//!              │       media_url, playhead,     │
//!              │       is_playing, leader_id,   │
//!              │     }                          │
//!              └────────────────────────────────┘
//! ```
//!
//! All state is ephemeral: nothing survives the process.

pub mod room;
pub mod store;

pub use room::{ConnectionId, Member, Room};
pub use store::RoomRegistry;
