//! Player plugin - movement, camera and the score resource.

use bevy::prelude::*;

use super::movement;
use super::score::Score;

/// Player plugin - handles player movement, camera, and scoring state.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);

        app.init_resource::<Score>();
    }
}
