//! Audio module - plays what levels and gameplay ask for.

mod plugin;

pub use plugin::GameAudioPlugin;
