//! Combat plugin - the rifle and its viewmodel.

use bevy::prelude::*;

use super::systems::fire_weapon;
use super::viewmodel::update_viewmodel_animation;
use crate::game::GameSet;
use crate::player::gameplay_active;

/// Combat plugin - handles firing and viewmodel motion.
///
/// The cooldown step runs inside the gameplay tick, which registers
/// [`decay_weapon_cooldown`](super::systems::decay_weapon_cooldown) itself.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                // The click that takes the cursor must not also fire
                fire_weapon
                    .run_if(gameplay_active)
                    .before(GameSet::Cursor),
                update_viewmodel_animation,
            ),
        );
    }
}
