use bevy::prelude::*;

use crate::game::ResolvedTheme;
use crate::game::systems::{ChoiceButton, DisplayRegionText, GameUiRoot};
use crate::ws::{DisplayRegion, Move};

const TITLE: &str = "Rock Paper Scissors";

/// Spawn the game screen: a title, the client-count region, one button
/// per move and the result region.
pub fn spawn_game_ui(commands: &mut Commands, theme: &ResolvedTheme) -> Entity {
    commands
        .spawn((
            GameUiRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(theme.background),
        ))
        .with_children(|root| {
            root.spawn((
                Text::new(TITLE),
                TextFont::from_font_size(40.0),
                TextColor(theme.text),
            ));

            root.spawn((
                DisplayRegionText(DisplayRegion::ClientCount),
                Text::new(""),
                TextFont::from_font_size(20.0),
                TextColor(theme.text),
            ));

            root.spawn(Node {
                flex_direction: FlexDirection::Row,
                column_gap: Val::Px(16.0),
                ..default()
            })
            .with_children(|row| {
                for mv in Move::ALL {
                    row.spawn((
                        Button,
                        ChoiceButton(mv),
                        Node {
                            width: Val::Px(160.0),
                            height: Val::Px(64.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(theme.button),
                    ))
                    .with_children(|button| {
                        button.spawn((
                            Text::new(mv.label()),
                            TextFont::from_font_size(24.0),
                            TextColor(theme.text),
                        ));
                    });
                }
            });

            root.spawn((
                Node {
                    padding: UiRect::all(Val::Px(16.0)),
                    min_width: Val::Px(400.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                BackgroundColor(theme.panel),
            ))
            .with_children(|panel| {
                panel.spawn((
                    DisplayRegionText(DisplayRegion::Result),
                    Text::new(""),
                    TextFont::from_font_size(28.0),
                    TextColor(theme.text),
                ));
            });
        })
        .id()
}

/// Startup system that spawns the game UI with the app's theme
pub fn setup_game_ui(mut commands: Commands, theme: Res<ResolvedTheme>) {
    spawn_game_ui(&mut commands, &theme);
    log::info!("Game UI spawned");
}
