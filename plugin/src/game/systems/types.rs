use bevy::prelude::*;

use crate::ws::{DisplayRegion, Move};

/// Marks a `Text` entity as one of the display regions.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayRegionText(pub DisplayRegion);

/// A button that plays `Move` when pressed.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChoiceButton(pub Move);

/// Marker component for the root of the built-in game UI
#[derive(Component)]
pub struct GameUiRoot;
