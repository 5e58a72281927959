//! Level plugin - asset loading, pause mirroring and the per-frame tick.

use bevy::prelude::*;

use super::assets::drive_asset_loading;
use super::lifecycle::{tick_current_level, LevelRegistry, RenderLoop};
use crate::core::PausedChanged;

/// System set for everything that drives level lifecycles.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LevelSet {
    /// Asset settling and pause mirroring
    Lifecycle,
    /// The current level's tick hook
    Tick,
}

/// Level plugin - must be added before any level registers its hooks.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelRegistry>()
            .init_resource::<RenderLoop>()
            .configure_sets(Update, (LevelSet::Lifecycle, LevelSet::Tick).chain())
            .add_systems(
                Update,
                (apply_pause_broadcast, drive_asset_loading)
                    .chain()
                    .in_set(LevelSet::Lifecycle),
            )
            .add_systems(Update, tick_current_level.in_set(LevelSet::Tick));
    }
}

/// Mirror the pause broadcast into every level.
fn apply_pause_broadcast(
    mut events: EventReader<PausedChanged>,
    mut registry: ResMut<LevelRegistry>,
) {
    if let Some(PausedChanged(paused)) = events.read().last() {
        registry.set_paused(*paused);
    }
}
