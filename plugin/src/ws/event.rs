use std::sync::mpsc;

use crate::ws::ServerMessage;

/// Abnormal closure, used when the socket dies without a close frame.
pub const CLOSE_ABNORMAL: u16 = 1006;

/// Lifecycle events pushed out of the connection thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Handshake finished. `protocol` is the subprotocol the server picked.
    Open { protocol: Option<String> },
    Message(ServerMessage),
    Error(String),
    Closed { code: u16, reason: String },
}

/// Receives events from the connection thread.
///
/// Implementors decide how events cross back to the consumer (a Bevy
/// resource, an async task, ...). Dispatch must not block.
pub trait EventSink: Send + 'static {
    fn dispatch(&self, event: ConnectionEvent);
}

impl EventSink for mpsc::Sender<ConnectionEvent> {
    fn dispatch(&self, event: ConnectionEvent) {
        if let Err(e) = self.send(event) {
            log::warn!("Dropping connection event, receiver is gone: {:?}", e.0);
        }
    }
}

impl EventSink for tokio::sync::mpsc::UnboundedSender<ConnectionEvent> {
    fn dispatch(&self, event: ConnectionEvent) {
        if let Err(e) = self.send(event) {
            log::warn!("Dropping connection event, receiver is gone: {:?}", e.0);
        }
    }
}
