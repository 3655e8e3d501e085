//! Game Server Connection
//!
//! The connection to the rock-paper-scissors server and the text
//! protocol it speaks. No Bevy dependencies - this can be used standalone.

mod config;
mod connection;
mod display;
mod error;
mod event;
mod message;

pub use config::{ConnectionConfig, DEFAULT_SUBPROTOCOL, DEFAULT_URL};
pub use connection::{ConnectionHandler, ReadyState};
#[cfg(test)]
pub(crate) use connection::Outbound;
pub use display::{DisplayRegion, DisplaySurface, apply_event};
pub use error::{ConfigError, ConnectError, SendError};
pub use event::{CLOSE_ABNORMAL, ConnectionEvent, EventSink};
pub use message::{CLIENT_COUNT_PREFIX, GameResult, Move, Outcome, ServerMessage};
