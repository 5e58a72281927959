//! Player module - player entity, movement, camera control and score.

mod components;
mod movement;
mod plugin;
mod score;

pub use components::*;
pub use movement::{gameplay_active, intent_direction, reset_player, spawn_player};
pub use plugin::PlayerPlugin;
pub use score::Score;
