//! Rock Paper Scissors Plugin for Bevy
//!
//! Wires the display regions and choice buttons to the connection owned
//! by the ws_bevy plugin.

use bevy::prelude::*;

use crate::game::ClientConfig;
use crate::game::systems::*;
use crate::game::ui::setup_game_ui;
use crate::ws_bevy::WsPlugin;

pub struct RpsPlugin {
    config: ClientConfig,
}

impl RpsPlugin {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

impl Default for RpsPlugin {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl Plugin for RpsPlugin {
    fn build(&self, app: &mut App) {
        log::info!("Building rock-paper-scissors plugin...");

        app.add_plugins(WsPlugin::new(self.config.connection.clone()));

        let theme = self.config.theme.resolve();
        app.insert_resource(ClearColor(theme.background))
            .insert_resource(theme);

        if self.config.spawn_ui {
            app.add_systems(Startup, setup_game_ui);
        }

        app.add_systems(
            Update,
            (
                process_connection_events,
                handle_choice_buttons,
                handle_choice_keys,
                update_button_colors,
            ),
        );

        log::info!("Rock-paper-scissors plugin configured");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ResolvedTheme, Theme};
    use crate::ws::ConnectionConfig;
    use crate::ws_bevy::{ConnectionEventReceiver, ConnectionResource};

    #[test]
    fn plugin_installs_connection_and_theme() {
        let config = ClientConfig::default()
            .with_connection(ConnectionConfig::default().with_url("ws://127.0.0.1:1"))
            .with_theme(Theme {
                background: "black".to_string(),
                ..Theme::default()
            })
            .without_ui();

        let mut app = App::new();
        app.add_plugins(RpsPlugin::new(config));

        let world = app.world();
        assert!(world.get_resource::<ConnectionResource>().is_some());
        assert!(world.get_resource::<ConnectionEventReceiver>().is_some());
        assert_eq!(world.resource::<ResolvedTheme>().background, Color::BLACK);
        assert_eq!(world.resource::<ClearColor>().0, Color::BLACK);
    }
}
