//! Skull Shooter - Entry Point
//!
//! Controls:
//! - WASD / arrows / swipes: Move
//! - Mouse: Look around (click to lock the cursor)
//! - Left click: Fire
//! - Escape: Release the cursor

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier3d::prelude::*;

use skull_shooter::core::GameConfig;

fn main() {
    let config = GameConfig::load();
    let log_level = if config.debug_mode {
        Level::DEBUG
    } else {
        Level::WARN
    };

    App::new()
        // Bevy default plugins
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Skull Shooter".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: log_level,
                    filter: "wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
        )

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Audio
        .add_plugins(AudioPlugin)

        // Our game plugin
        .insert_resource(config)
        .add_plugins(skull_shooter::SkullShooterPlugin)

        .run();
}
