//! Error types shared across the game.

use thiserror::Error;

use crate::level::{LevelId, LevelPhase};

/// Errors raised by level navigation and the level lifecycle.
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    /// Navigation was requested to a level name nobody registered.
    #[error("A level with name '{0}' doesn't exist")]
    UnknownLevel(String),

    /// A lifecycle operation was called from a phase that doesn't allow it.
    #[error("Cannot {action} level {level:?} while it is {phase:?}")]
    InvalidTransition {
        level: LevelId,
        phase: LevelPhase,
        action: &'static str,
    },

    /// The level id is known but was never registered with hooks.
    #[error("Level {0:?} is not registered")]
    NotRegistered(LevelId),

    /// A lifecycle hook failed to run.
    #[error("Hook '{hook}' of level {level:?} failed: {details}")]
    Hook {
        level: LevelId,
        hook: &'static str,
        details: String,
    },
}

/// Errors from reading or writing the persisted best score.
#[derive(Debug, Error)]
pub enum HighScoreError {
    /// No writable data directory on this platform.
    #[error("No data directory available for the score file")]
    NoDataDir,

    /// Score file could not be read or written.
    #[error("I/O error on '{path}': {details}")]
    Io { path: String, details: String },

    /// Score file contents are not valid RON.
    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },

    /// Score could not be serialized.
    #[error("Failed to serialize score: {0}")]
    Serialize(String),
}

/// Errors from loading the game configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{path}': {details}")]
    Read { path: String, details: String },

    #[error("Parse error in '{path}': {details}")]
    Parse { path: String, details: String },
}
