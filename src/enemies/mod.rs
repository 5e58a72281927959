//! Enemies module - skull entities, behaviour, and spawning.

mod ai;
mod components;
mod plugin;
mod spawning;

pub use ai::{destroy_enemy, remove_all_enemies, step_enemies};
pub use components::*;
pub use plugin::EnemyPlugin;
pub use spawning::{spawn_enemy, EnemyRng};
