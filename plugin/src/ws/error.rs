use thiserror::Error;

use crate::ws::ReadyState;

/// Failures while establishing a connection.
///
/// These never reach the caller of `ConnectionHandler::connect`; they are
/// logged and reported as a `ConnectionEvent::Error` followed by a close.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported scheme '{0}', expected 'ws'")]
    UnsupportedScheme(String),
    #[error("URL has no host")]
    MissingHost,
    #[error("TCP connection failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid header value for {name}: {value}")]
    InvalidHeader { name: &'static str, value: String },
    #[error("Handshake failed: {0}")]
    Handshake(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("Failed to create runtime: {0}")]
    Runtime(std::io::Error),
}

/// Failures of `ConnectionHandler::send`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("WebSocket is not open (state: {0:?})")]
    NotOpen(ReadyState),
    #[error("WebSocket connection task has ended")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
