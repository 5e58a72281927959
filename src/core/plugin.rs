//! Core plugin that sets up configuration, global events and tweening.

use bevy::prelude::*;

use super::config::GameConfig;
use super::events::*;
use super::tween::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - The `GameConfig` resource (unless the binary inserted one already)
/// - Global events (level flow, pause broadcast, match events, sound cues)
/// - Transform tweening
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<GameConfig>() {
            app.insert_resource(GameConfig::load());
        }

        app
            // Level flow
            .add_event::<AssetsLoaded>()
            .add_event::<ExitStarted>()
            .add_event::<GotoLevel>()
            .add_event::<PausedChanged>()

            // Match flow
            .add_event::<GameOver>()
            .add_event::<ReplayRequested>()
            .add_event::<Replay>()
            .add_event::<PlayerAttacked>()
            .add_event::<EnemyKilled>()
            .add_event::<AmmoOver>()
            .add_event::<SoundCue>()

            // Tweens run for every level
            .add_systems(Update, (update_smooth_transforms, update_height_tweens));
    }
}
