//! Wire protocol for room synchronization
//!
//! Inbound and outbound events are closed tagged enums so the coordinator's
//! transition table is a single exhaustive match. The wire envelope is
//! `{"event": "<name>", "data": {...}}` with kebab-case event names and
//! camelCase payload keys.

pub mod message;

pub use message::{ClientEvent, ServerEvent};
