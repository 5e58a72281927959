//! Match bookkeeping: life, waves and the live skull count.

use bevy::prelude::*;

use crate::core::config::LevelConfig;

/// What an enemy hit did to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The match is already over.
    Ignored,
    Damaged,
    /// Life ran out.
    Killed,
}

/// Size and spawn radius of one wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub count: u32,
    pub radius: f32,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MatchState {
    /// Always within `0..=max_life`.
    pub player_life: i32,
    pub max_enemies: u32,
    pub current_enemies: u32,
    pub enemy_distance_from_center: f32,
    pub over: bool,
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(&LevelConfig::default())
    }
}

impl MatchState {
    pub fn new(config: &LevelConfig) -> Self {
        Self {
            player_life: config.max_life,
            max_enemies: config.initial_max_enemies,
            current_enemies: 0,
            enemy_distance_from_center: config.initial_enemy_distance,
            over: false,
        }
    }

    /// Back to a fresh match.
    pub fn reset(&mut self, config: &LevelConfig) {
        *self = Self::new(config);
    }

    pub fn player_was_attacked(&mut self, config: &LevelConfig) -> AttackOutcome {
        if self.over {
            return AttackOutcome::Ignored;
        }

        self.player_life -= config.damage_per_attack;
        if self.player_life <= 0 {
            self.player_life = 0;
            return AttackOutcome::Killed;
        }
        AttackOutcome::Damaged
    }

    pub fn player_hit_enemy(&mut self) {
        self.current_enemies = self.current_enemies.saturating_sub(1);
    }

    /// Top the skull count up to the maximum, then grow the next wave.
    pub fn begin_wave(&mut self, config: &LevelConfig) -> Wave {
        let wave = Wave {
            count: self.max_enemies.saturating_sub(self.current_enemies),
            radius: self.enemy_distance_from_center,
        };

        self.current_enemies += wave.count;
        self.max_enemies += config.max_enemies_growth;
        self.enemy_distance_from_center += config.enemy_distance_growth;
        wave
    }
}

/// Recurring timer that sends the next wave.
#[derive(Resource)]
pub struct WaveTimer(pub Timer);

impl WaveTimer {
    pub fn new(config: &LevelConfig) -> Self {
        Self(Timer::from_seconds(config.wave_interval_secs, TimerMode::Repeating))
    }
}

impl Default for WaveTimer {
    fn default() -> Self {
        Self::new(&LevelConfig::default())
    }
}
