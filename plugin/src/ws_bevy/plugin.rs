//! WebSocket Bevy Plugin Implementation

use bevy::prelude::*;
use std::ops::Deref;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::ws::{ConnectionConfig, ConnectionEvent, ConnectionHandler};

/// Bevy Resource wrapper for the connection handler.
///
/// Keeps the ws module free of Bevy dependencies. Dropping the resource
/// closes the connection.
#[derive(Resource)]
pub struct ConnectionResource(ConnectionHandler);

impl ConnectionResource {
    pub fn new(handler: ConnectionHandler) -> Self {
        Self(handler)
    }
}

impl Deref for ConnectionResource {
    type Target = ConnectionHandler;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Events pushed by the connection thread, drained once per frame.
#[derive(Resource)]
pub struct ConnectionEventReceiver {
    rx: Mutex<Receiver<ConnectionEvent>>,
}

impl ConnectionEventReceiver {
    /// Create the sender the connection thread writes into and the
    /// receiver systems read from.
    pub fn channel() -> (Sender<ConnectionEvent>, ConnectionEventReceiver) {
        let (tx, rx) = mpsc::channel();
        (tx, ConnectionEventReceiver { rx: Mutex::new(rx) })
    }

    /// Try to receive the next event without blocking
    pub fn try_recv(&self) -> Option<ConnectionEvent> {
        self.rx.lock().ok()?.try_recv().ok()
    }
}

/// Bevy plugin for the game server connection.
///
/// This plugin:
/// - Connects exactly once, while the app is being built
/// - Exposes `ConnectionResource` for systems that send
/// - Exposes `ConnectionEventReceiver` for systems that react to events
///
/// There is no reconnection: once the connection closes it stays closed.
pub struct WsPlugin {
    config: ConnectionConfig,
}

impl WsPlugin {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }
}

impl Plugin for WsPlugin {
    fn build(&self, app: &mut App) {
        let (sink, receiver) = ConnectionEventReceiver::channel();

        log::info!(
            "Connecting to game server at {} ({})",
            self.config.url,
            self.config.subprotocol
        );
        let handler = ConnectionHandler::connect(self.config.clone(), sink);

        app.insert_resource(ConnectionResource(handler));
        app.insert_resource(receiver);

        log::info!("WebSocket plugin configured");
    }
}
