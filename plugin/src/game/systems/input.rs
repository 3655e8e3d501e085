use bevy::prelude::*;

use crate::game::ResolvedTheme;
use crate::game::systems::types::ChoiceButton;
use crate::ws::{ConnectionHandler, Move};
use crate::ws_bevy::ConnectionResource;

/// Keyboard shortcuts for the three moves.
pub const MOVE_KEYS: [(KeyCode, Move); 3] = [
    (KeyCode::KeyR, Move::Rock),
    (KeyCode::KeyP, Move::Paper),
    (KeyCode::KeyS, Move::Scissors),
];

/// Send the move of every choice button pressed this frame
pub fn handle_choice_buttons(
    query: Query<(&Interaction, &ChoiceButton), Changed<Interaction>>,
    connection: Option<Res<ConnectionResource>>,
) {
    let Some(connection) = connection else {
        return;
    };

    for (interaction, button) in &query {
        if *interaction == Interaction::Pressed {
            play(&connection, button.0);
        }
    }
}

/// Send moves for the R / P / S keys
pub fn handle_choice_keys(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    connection: Option<Res<ConnectionResource>>,
) {
    let (Some(keyboard), Some(connection)) = (keyboard, connection) else {
        return;
    };

    for (key, mv) in MOVE_KEYS {
        if keyboard.just_pressed(key) {
            play(&connection, mv);
        }
    }
}

fn play(connection: &ConnectionHandler, mv: Move) {
    let id = connection.id();
    log::debug!("[WebSocket {}] Playing {} ({})", id, mv, mv.wire());
    // No queueing and no retry: a closed connection just drops the move.
    if let Err(e) = connection.send(mv) {
        log::warn!("[WebSocket {}] Could not play {}: {}", id, mv, e);
    }
}

pub fn update_button_colors(
    theme: Option<Res<ResolvedTheme>>,
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<ChoiceButton>),
    >,
) {
    let Some(theme) = theme else {
        return;
    };

    for (interaction, mut background) in &mut buttons {
        background.0 = theme.button_color(*interaction);
    }
}
