//! A rock-paper-scissors client for a text-frame WebSocket game server,
//! rendered with Bevy UI.
//!
//! - [`ws`] owns the connection and the message model, without Bevy.
//! - [`ws_bevy`] exposes the connection as Bevy resources.
//! - [`game`] draws the display regions and choice buttons.

pub mod game;
pub mod ws;
pub mod ws_bevy;

pub use game::{ClientConfig, RpsPlugin, Theme};
pub use ws::{ConnectionConfig, ConnectionHandler, Move, ServerMessage};
pub use ws_bevy::WsPlugin;
