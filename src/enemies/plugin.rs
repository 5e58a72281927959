//! Enemy plugin - randomness and deferred removal.
//!
//! Stepping the skulls belongs to the gameplay tick, which registers
//! [`step_enemies`](super::ai::step_enemies) itself.

use bevy::prelude::*;

use super::ai;
use super::spawning::EnemyRng;

/// Enemy plugin - handles enemy removal after death.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRng>()
            // Removal keeps running while the match is paused
            .add_systems(Update, ai::despawn_dead_enemies);
    }
}
