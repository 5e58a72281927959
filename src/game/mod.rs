//! Game module - drives which level is active and captures player intent.

mod input;
mod plugin;

pub use input::{swipe_direction, Direction, MovementIntent, SwipeTimers};
pub use plugin::{handle_level_navigation, release_cursor, GamePlugin, GameSet, PauseHold};
