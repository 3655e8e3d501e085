//! WebSocket Bevy Plugin
//!
//! Owns the game server connection and exposes it as Bevy resources.

mod plugin;

pub use plugin::{ConnectionEventReceiver, ConnectionResource, WsPlugin};

// Re-export core connection types for convenience
pub use crate::ws::{ConnectionConfig, ConnectionEvent, ConnectionHandler, ReadyState};
