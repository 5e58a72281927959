//! Core game module - config, errors, events, and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

pub mod config;
pub mod error;
mod events;
mod plugin;
mod tween;

pub use config::GameConfig;
pub use error::{ConfigError, HighScoreError, LevelError};
pub use events::*;
pub use plugin::CorePlugin;
pub use tween::*;
