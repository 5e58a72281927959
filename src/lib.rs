//! Skull Shooter - a first-person arena shooter in Bevy.
//!
//! The player stands on a sand plane, shoots flying skulls with a rifle,
//! picks up an ammo box when the rifle runs dry, and survives growing waves.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Config, errors, global events, tweening
//! - **Level**: The `Idle → Loading → Running → Exiting` lifecycle and per-level assets
//! - **Game**: Level navigation, pause broadcast, movement intent, cursor lock
//! - **Player**: First-person movement, camera, score
//! - **Combat**: The rifle, firing, viewmodel
//! - **Enemies**: Skull behaviour and spawning
//! - **FirstLevel**: The arena match
//! - **Menus**: Home menu and credits levels
//! - **UI**: Buttons, HUD, end-of-match menu
//! - **Audio**: Music and sound cues
//! - **Persistence**: The saved best score

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod first_level;
pub mod game;
pub mod level;
pub mod menus;
pub mod persistence;
pub mod player;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SkullShooterPlugin;

impl Plugin for SkullShooterPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(level::LevelPlugin)

            // Gameplay
            .add_plugins(player::PlayerPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(enemies::EnemyPlugin)

            // Levels register their hooks
            .add_plugins(menus::HomeMenuPlugin)
            .add_plugins(menus::CreditsPlugin)
            .add_plugins(first_level::FirstLevelPlugin)

            // Drives the levels, so after they registered
            .add_plugins(game::GamePlugin)

            .add_plugins(ui::UiPlugin)
            .add_plugins(audio::GameAudioPlugin);
    }
}
