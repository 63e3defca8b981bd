//! # roomsync
//!
//! Watch-together server library: synchronized media playback rooms over
//! WebSocket.
//!
//! Participants join named rooms; each room has exactly one leader whose
//! periodic time reports are authoritative for drift correction, so every
//! independently rendering client stays on a shared timeline. Rooms are
//! created lazily on first join and destroyed the moment they empty;
//! leadership passes deterministically (earliest remaining joiner) on
//! leader departure. All state is in-process and ephemeral.
//!
//! ## Quick start
//!
//! ```no_run
//! use roomsync::{ServerConfig, SyncServer};
//!
//! #[tokio::main]
//! async fn main() -> roomsync::Result<()> {
//!     let config = ServerConfig::default(); // 0.0.0.0:5000
//!     SyncServer::new(config).run().await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!   WebSocket frame ─► ws handler ─► SyncCoordinator ─► RoomRegistry
//!                                          │
//!                                     Broadcaster
//!                                          │
//!                      WsBroadcaster ─► ConnectionTable ─► sockets
//! ```
//!
//! The coordinator is transport-agnostic: it consumes `ClientEvent`s and
//! emits `ServerEvent`s through the [`Broadcaster`] trait. The bundled
//! axum transport is one implementation of that seam; tests plug in a
//! recorder instead.

pub mod error;
pub mod protocol;
pub mod registry;
pub mod server;
pub mod sync;

pub use error::{Error, Result};
pub use protocol::{ClientEvent, ServerEvent};
pub use registry::{ConnectionId, Member, Room, RoomRegistry};
pub use server::{ServerConfig, SyncServer, WsBroadcaster};
pub use sync::{Broadcaster, SyncCoordinator};
