use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_rps::{ClientConfig, RpsPlugin};

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Rock Paper Scissors".to_string(),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: "info,wgpu=error,bevy_rps=debug".to_string(),
                ..default()
            }),
    );

    // Optional JSON config path as the first argument. Loaded after
    // DefaultPlugins so the LogPlugin reports failures.
    let config = match std::env::args().nth(1) {
        Some(path) => match ClientConfig::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Not starting, config {} could not be loaded: {}", path, e);
                return;
            }
        },
        None => ClientConfig::default(),
    };

    app.add_plugins(RpsPlugin::new(config))
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
    log::info!("Press R, P or S, or click a button to play");
}
