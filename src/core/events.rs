//! Global events used for cross-system communication.
//!
//! Levels, the game driver and gameplay systems never call each other
//! directly. They talk through these events so each side stays testable.

use bevy::prelude::*;

use crate::level::LevelId;

/// A level finished loading its assets and built its scene.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetsLoaded(pub LevelId);

/// A level started tearing itself down.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStarted(pub LevelId);

/// Request to switch to the level with this name.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct GotoLevel(pub String);

impl GotoLevel {
    pub fn to(level: LevelId) -> Self {
        Self(level.name().to_string())
    }
}

/// Pause broadcast. Every level mirrors the latest value.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PausedChanged(pub bool);

/// The match ended. The game driver pauses the simulation on this.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct GameOver;

/// The player asked for another match.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ReplayRequested;

/// A new match started after a game over. The game driver resumes on this.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct Replay;

/// An enemy reached the player and landed a hit.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerAttacked {
    pub attacker: Entity,
}

/// The player destroyed an enemy.
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyKilled {
    pub enemy: Entity,
}

/// The rifle is about to run dry.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct AmmoOver;

/// A sound to play, by what happened rather than by file.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Fire,
    Reload,
    Empty,
    MonsterAttack,
    PlayerDamaged,
}

impl SoundCue {
    /// Asset registry key of the clip for this cue.
    pub fn asset_name(self) -> &'static str {
        match self {
            SoundCue::Fire => "shotgun",
            SoundCue::Reload => "reload",
            SoundCue::Empty => "empty",
            SoundCue::MonsterAttack => "monsterAttack",
            SoundCue::PlayerDamaged => "playerDamaged",
        }
    }
}
