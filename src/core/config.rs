//! Gameplay tunables loaded from an external RON file.
//!
//! Allows tweaking weapon, enemy and match numbers without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use super::error::ConfigError;

/// Default location of the config file, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/data/game_config.ron";

/// Root configuration, inserted as a resource before any plugin builds.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Developer logs (missing assets, late callbacks) are only visible with this on.
    pub debug_mode: bool,
    pub weapon: WeaponConfig,
    pub enemy: EnemyConfig,
    pub level: LevelConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            debug_mode: true,
            weapon: WeaponConfig::default(),
            enemy: EnemyConfig::default(),
            level: LevelConfig::default(),
        }
    }
}

/// Rifle numbers.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Milliseconds between shots.
    pub fire_rate_ms: f32,
    pub initial_ammo: u32,
    pub reload_amount: u32,
    /// Max length of the aiming ray.
    pub range: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            fire_rate_ms: 350.0,
            initial_ammo: 10,
            reload_amount: 10,
            range: 1000.0,
        }
    }
}

/// Skull behaviour numbers.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Units per second while wandering or following. Doubled while attacking.
    pub speed: f32,
    pub altitude: f32,
    pub attack_distance: f32,
    pub close_distance: f32,
    pub follow_distance: f32,
    /// Attacking skulls stop closing in below this distance.
    pub stop_distance: f32,
    /// Wander targets closer than this are considered reached.
    pub target_reached_distance: f32,
    pub removal_delay_secs: f32,
    /// Seconds of sinking per unit of height when destroyed.
    pub sink_secs_per_unit: f32,
    pub sink_floor: f32,
    pub scale: f32,
    pub collider_radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: 24.0,
            altitude: 2.5,
            attack_distance: 5.0,
            close_distance: 3.5,
            follow_distance: 27.0,
            stop_distance: 3.0,
            target_reached_distance: 1.0,
            removal_delay_secs: 0.3,
            sink_secs_per_unit: 0.1,
            sink_floor: 0.5,
            scale: 0.25,
            collider_radius: 1.0,
        }
    }
}

/// Match and arena numbers for the gameplay level.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub max_life: i32,
    pub damage_per_attack: i32,
    pub initial_max_enemies: u32,
    pub initial_enemy_distance: f32,
    pub max_enemies_growth: u32,
    pub enemy_distance_growth: f32,
    pub wave_interval_secs: f32,
    /// Falling below this height ends the match.
    pub fall_threshold: f32,
    /// Camera (eye) position at match start and on replay.
    pub camera_spawn: (f32, f32, f32),
    pub ground_size: f32,
    pub skybox_size: f32,
    pub clear_color: (f32, f32, f32),
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            max_life: 100,
            damage_per_attack: 5,
            initial_max_enemies: 10,
            initial_enemy_distance: 100.0,
            max_enemies_growth: 1,
            enemy_distance_growth: 10.0,
            wave_interval_secs: 25.0,
            fall_threshold: -20.0,
            camera_spawn: (0.0, 3.5, 100.0),
            ground_size: 500.0,
            skybox_size: 1000.0,
            clear_color: (0.467, 0.467, 0.467),
        }
    }
}

impl LevelConfig {
    pub fn camera_spawn(&self) -> Vec3 {
        Vec3::new(self.camera_spawn.0, self.camera_spawn.1, self.camera_spawn.2)
    }
}

impl GameConfig {
    /// Parse a config from RON text.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, ConfigError> {
        ron::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Read and parse a config file.
    pub fn try_load(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(path, &contents)
    }

    /// Load the config from [`CONFIG_PATH`], falling back to defaults.
    ///
    /// Runs before the log plugin exists, so problems go to stderr.
    pub fn load() -> Self {
        match Self::try_load(CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}. Using default game config.");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = GameConfig::from_ron("test.ron", "(debug_mode: false, weapon: (initial_ammo: 3))")
            .expect("valid ron");

        assert!(!config.debug_mode);
        assert_eq!(config.weapon.initial_ammo, 3);
        assert_eq!(config.weapon.fire_rate_ms, 350.0);
        assert_eq!(config.level.initial_max_enemies, 10);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = GameConfig::from_ron("bad.ron", "(weapon: [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = GameConfig::try_load("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
