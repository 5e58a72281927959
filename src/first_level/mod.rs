//! First level - the arena match: skull waves, the rifle, scoring.

mod flow;
mod match_state;
mod plugin;
mod scene;

pub use flow::{spawn_wave, EndMatch};
pub use match_state::{AttackOutcome, MatchState, Wave, WaveTimer};
pub use plugin::{gameplay_tick, FirstLevelPlugin, FirstLevelSet};
pub use scene::AmmoBox;
