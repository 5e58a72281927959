//! Persistence module - the saved best score.

mod high_score;

pub use high_score::{HighScoreStore, HighScores, MemoryHighScoreStore, RonHighScoreStore};
