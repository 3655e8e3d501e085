use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::game::Theme;
use crate::ws::{ConfigError, ConnectionConfig};

/// Everything `RpsPlugin` needs. Every field may be omitted from JSON.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub connection: ConnectionConfig,
    pub theme: Theme,
    /// Spawn the built-in UI at startup. Turn off to supply your own
    /// `DisplayRegionText` and `ChoiceButton` entities.
    pub spawn_ui: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            theme: Theme::default(),
            spawn_ui: true,
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            log::error!("Failed to load config from {}: {}", path.display(), e);
            e
        })?;
        Self::from_json(&content)
    }

    pub fn with_connection(mut self, connection: ConnectionConfig) -> Self {
        self.connection = connection;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn without_ui(mut self) -> Self {
        self.spawn_ui = false;
        self
    }
}
