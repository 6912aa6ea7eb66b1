//! Plain-text high score persistence
//!
//! The file holds one ASCII decimal integer. It is opened and closed on every
//! call; writes overwrite in place with no temp file, so the last writer wins.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle to the high-score file at a fixed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreFile {
    path: PathBuf,
}

impl HighScoreFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored score, or 0 if the file is missing or unreadable
    pub fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => parse_score(&contents).unwrap_or(0),
            Err(err) => {
                debug!(path = ?self.path, %err, "no stored high score");
                0
            }
        }
    }

    /// Overwrite the file with `score`
    pub fn save(&self, score: u32) -> Result<()> {
        std::fs::write(&self.path, score.to_string())
            .with_context(|| format!("Failed to write high score to {:?}", self.path))
    }
}

/// Leading decimal digits after optional whitespace; the rest is ignored
fn parse_score(contents: &str) -> Option<u32> {
    let trimmed = contents.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().ok()
}
