use serde::Deserialize;
use url::Url;

use crate::ws::ConnectError;

pub const DEFAULT_URL: &str = "ws://localhost:8080";
pub const DEFAULT_SUBPROTOCOL: &str = "game-protocol";

/// Where and how to connect to the game server.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub url: String,
    pub subprotocol: String,
    /// Sent as the `Origin` header when set.
    pub origin: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            subprotocol: DEFAULT_SUBPROTOCOL.to_string(),
            origin: None,
        }
    }
}

impl ConnectionConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_subprotocol(mut self, subprotocol: impl Into<String>) -> Self {
        self.subprotocol = subprotocol.into();
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Parse the URL and resolve the `host:port` to open a TCP stream to.
    ///
    /// Only plain `ws://` endpoints are accepted; the port defaults to 80.
    pub fn socket_addr(&self) -> Result<(Url, String), ConnectError> {
        let url = Url::parse(&self.url)?;
        if url.scheme() != "ws" {
            return Err(ConnectError::UnsupportedScheme(url.scheme().to_string()));
        }

        let host = url.host_str().ok_or(ConnectError::MissingHost)?;
        let port = url.port_or_known_default().unwrap_or(80);
        let addr = format!("{}:{}", host, port);

        Ok((url, addr))
    }
}
