//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player body.
#[derive(Component)]
pub struct Player;

/// The first-person camera, child of the player body.
#[derive(Component, Default)]
pub struct PlayerCamera {
    /// Current pitch angle in radians (looking up/down)
    pub pitch: f32,
}

/// Tracks player movement state for physics.
#[derive(Component)]
pub struct MovementState {
    pub is_grounded: bool,
    pub vertical_velocity: f32,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            is_grounded: true,
            vertical_velocity: 0.0,
        }
    }
}

/// Configuration for the first-person camera controller.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
    /// Invert Y-axis for mouse look
    pub invert_y: bool,
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Gravity acceleration
    pub gravity: f32,
    /// Camera height above the body centre
    pub eye_offset: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.25,
            invert_y: false,
            move_speed: 12.0,
            gravity: 9.81,
            eye_offset: 1.0,
        }
    }
}
