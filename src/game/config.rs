use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::direction::Direction;
use super::state::Position;

/// What happens when the head leaves the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// Coordinates are unbounded; off-grid segments are not drawn
    #[default]
    Open,
    /// The head re-enters from the opposite edge
    Wrap,
}

/// Whether walls and the snake's own body end the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// The snake passes through walls and itself
    #[default]
    Ignore,
    /// Wall or self hits switch the game to the game-over state
    GameOver,
}

/// Configuration for the game
///
/// Built once at startup and never mutated afterwards. The defaults reproduce
/// the classic 20x20 board with a 100 ms tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Fixed movement interval in milliseconds
    pub tick_interval_ms: u64,
    /// Target render rate
    pub frame_rate: u32,
    /// Cell the single-segment snake starts on
    pub start_position: Position,
    /// Initial direction of travel
    pub start_direction: Direction,

    pub boundary: Boundary,
    pub collisions: CollisionPolicy,

    /// File holding the persisted high score
    pub score_path: PathBuf,
    /// Background music; startup fails without it
    pub audio_path: PathBuf,
    /// HUD font; optional
    pub font_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            tick_interval_ms: 100,
            frame_rate: 60,
            start_position: Position::new(5, 5),
            start_direction: Direction::Down,
            boundary: Boundary::Open,
            collisions: CollisionPolicy::Ignore,
            score_path: PathBuf::from("highscore.txt"),
            audio_path: PathBuf::from("background.wav"),
            font_path: PathBuf::from("arial.ttf"),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1 (got {}x{})",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= i32::MAX as usize && self.grid_height <= i32::MAX as usize,
            "grid dimensions exceed coordinate range"
        );
        let start = self.start_position;
        ensure!(
            start.x >= 0
                && start.y >= 0
                && (start.x as usize) < self.grid_width
                && (start.y as usize) < self.grid_height,
            "start position ({}, {}) is outside the {}x{} grid",
            start.x,
            start.y,
            self.grid_width,
            self.grid_height
        );
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");
        ensure!(self.frame_rate > 0, "frame rate must be positive");
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.start_position, Position::new(5, 5));
        assert_eq!(config.start_direction, Direction::Down);
        assert_eq!(config.boundary, Boundary::Open);
        assert_eq!(config.collisions, CollisionPolicy::Ignore);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
    }

    #[test]
    fn test_frame_interval() {
        let config = GameConfig {
            frame_rate: 50,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }

    #[test]
    fn test_rejects_degenerate_values() {
        assert!(GameConfig::new(0, 10).validate().is_err());
        assert!(GameConfig::new(10, 0).validate().is_err());

        let zero_tick = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(zero_tick.validate().is_err());

        let zero_fps = GameConfig {
            frame_rate: 0,
            ..Default::default()
        };
        assert!(zero_fps.validate().is_err());
    }

    #[test]
    fn test_start_position_must_be_on_grid() {
        let err = GameConfig::new(3, 3).validate().unwrap_err();
        assert!(err.to_string().contains("outside the 3x3 grid"));

        let corner = GameConfig {
            start_position: Position::new(2, 2),
            ..GameConfig::new(3, 3)
        };
        assert!(corner.validate().is_ok());

        let negative = GameConfig {
            start_position: Position::new(-1, 0),
            ..GameConfig::default()
        };
        assert!(negative.validate().is_err());

        // 6x6 is the smallest board the default start fits on
        assert!(GameConfig::new(6, 6).validate().is_ok());
        assert!(GameConfig::new(6, 5).validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(
            &path,
            r#"{ "grid_width": 32, "boundary": "wrap", "collisions": "game_over" }"#,
        )
        .unwrap();

        let config = GameConfig::from_json_file(&path).unwrap();
        assert_eq!(config.grid_width, 32);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.boundary, Boundary::Wrap);
        assert_eq!(config.collisions, CollisionPolicy::GameOver);
        assert_eq!(config.score_path, PathBuf::from("highscore.txt"));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = GameConfig::from_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
