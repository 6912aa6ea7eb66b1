//! On-disk state that outlives a session

pub mod high_score;

pub use high_score::HighScoreFile;
