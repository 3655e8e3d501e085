//! # Rock Paper Scissors for Bevy
//!
//! Connects to the game server, shows the connected-client count and the
//! latest result, and sends the player's moves.
//!
//! ## Example
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_rps::{ClientConfig, RpsPlugin};
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(RpsPlugin::new(ClientConfig::default()))
//!         .add_systems(Startup, |mut commands: Commands| {
//!             commands.spawn(Camera2d);
//!         })
//!         .run();
//! }
//! ```
pub mod plugin;

mod config;
mod style;
mod systems;
mod ui;

pub use config::ClientConfig;
pub use plugin::RpsPlugin;
pub use style::{ResolvedTheme, Theme, parse_color};
pub use systems::*;
pub use ui::{setup_game_ui, spawn_game_ui};
