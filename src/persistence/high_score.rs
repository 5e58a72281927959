//! The best score, kept across sessions.
//!
//! Gameplay only sees the [`HighScoreStore`] trait. The game uses a RON file in
//! the platform data directory; tests use the in-memory store.

use std::fs;
use std::path::PathBuf;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::HighScoreError;

/// File name of the saved record inside the data directory.
const RECORD_FILE: &str = "last_record.ron";
const APP_DIR: &str = "skull-shooter";

/// Key-value storage for the single best score.
pub trait HighScoreStore {
    /// Stored best, 0 when nothing was stored yet.
    fn best(&self) -> u32;

    fn set_best(&mut self, points: u32) -> Result<(), HighScoreError>;
}

/// Store that forgets everything on exit.
#[derive(Debug, Default, Clone)]
pub struct MemoryHighScoreStore {
    best: u32,
}

impl MemoryHighScoreStore {
    pub fn with_best(best: u32) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn best(&self) -> u32 {
        self.best
    }

    fn set_best(&mut self, points: u32) -> Result<(), HighScoreError> {
        self.best = points;
        Ok(())
    }
}

/// On-disk format. Missing fields parse as their default.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
struct RecordFile {
    #[serde(default)]
    last_record: u32,
}

/// Best score kept in `last_record.ron`.
#[derive(Debug, Clone)]
pub struct RonHighScoreStore {
    path: PathBuf,
    best: u32,
}

impl RonHighScoreStore {
    /// Store under the platform data directory.
    pub fn open() -> Result<Self, HighScoreError> {
        let dir = dirs::data_dir().ok_or(HighScoreError::NoDataDir)?;
        Ok(Self::at(dir.join(APP_DIR).join(RECORD_FILE)))
    }

    /// Store at an explicit path. A missing or broken file reads as 0.
    pub fn at(path: PathBuf) -> Self {
        let best = match Self::read(&path) {
            Ok(best) => best,
            Err(e) => {
                warn!("{}. Best score starts at 0.", e);
                0
            }
        };
        Self { path, best }
    }

    fn read(path: &PathBuf) -> Result<u32, HighScoreError> {
        if !path.exists() {
            info!("No score file at {:?} yet", path);
            return Ok(0);
        }

        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|e| HighScoreError::Io {
            path: display.clone(),
            details: e.to_string(),
        })?;
        let record: RecordFile = ron::from_str(&contents).map_err(|e| HighScoreError::Parse {
            path: display,
            details: e.to_string(),
        })?;
        Ok(record.last_record)
    }

    fn write(&self, points: u32) -> Result<(), HighScoreError> {
        let display = self.path.display().to_string();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| HighScoreError::Io {
                path: display.clone(),
                details: e.to_string(),
            })?;
        }

        let record = RecordFile {
            last_record: points,
        };
        let serialized = ron::ser::to_string_pretty(&record, ron::ser::PrettyConfig::default())
            .map_err(|e| HighScoreError::Serialize(e.to_string()))?;

        fs::write(&self.path, serialized).map_err(|e| HighScoreError::Io {
            path: display,
            details: e.to_string(),
        })
    }
}

impl HighScoreStore for RonHighScoreStore {
    fn best(&self) -> u32 {
        self.best
    }

    fn set_best(&mut self, points: u32) -> Result<(), HighScoreError> {
        self.write(points)?;
        self.best = points;
        info!("New best score {} saved to {:?}", points, self.path);
        Ok(())
    }
}

/// The store the game writes records to.
#[derive(Resource)]
pub struct HighScores(pub Box<dyn HighScoreStore + Send + Sync>);

impl HighScores {
    pub fn new(store: impl HighScoreStore + Send + Sync + 'static) -> Self {
        Self(Box::new(store))
    }

    /// File store when a data directory exists, memory otherwise.
    pub fn from_platform() -> Self {
        match RonHighScoreStore::open() {
            Ok(store) => Self::new(store),
            Err(e) => {
                warn!("{}. Best score will not persist.", e);
                Self::new(MemoryHighScoreStore::default())
            }
        }
    }

    pub fn store(&mut self) -> &mut dyn HighScoreStore {
        self.0.as_mut()
    }

    pub fn best(&self) -> u32 {
        self.0.best()
    }
}
