//! Level module - the lifecycle every level goes through, and its assets.

mod assets;
mod lifecycle;
mod plugin;

pub use assets::{AssetKind, AssetRegistry, AssetTask, SoundEntry, SoundOptions, TaskStatus};
pub use lifecycle::{
    complete_loading, exit_level, level_running, start_level, tick_current_level, Level,
    LevelEntity, LevelHooks, LevelId, LevelPhase, LevelRegistry, RenderLoop,
};
pub use plugin::{LevelPlugin, LevelSet};
