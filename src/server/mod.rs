//! WebSocket transport
//!
//! Everything on the far side of the `Broadcaster` seam: the axum listener,
//! per-connection handling, the live connection table, and server
//! configuration. The coordinator neither knows nor cares that the channel
//! underneath is a WebSocket.

pub mod config;
pub mod connections;
pub mod listener;
mod ws;

pub use config::ServerConfig;
pub use connections::{ConnectionTable, WsBroadcaster};
pub use listener::SyncServer;
