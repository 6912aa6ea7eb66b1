use anyhow::{Context, Result};
use clap::Parser;
use snake_xenzia::audio::{BackgroundMusic, MusicTrack};
use snake_xenzia::game::{Boundary, CollisionPolicy, GameConfig};
use snake_xenzia::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Parser)]
#[command(name = "snake_xenzia")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between movement ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Render rate in frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Wrap around the board edges instead of leaving it
    #[arg(long)]
    wrap: bool,

    /// End the game on wall or self collisions
    #[arg(long)]
    collisions: bool,

    /// High score file
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Background music (required)
    #[arg(long)]
    audio: Option<PathBuf>,

    /// HUD font (optional)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Write logs here; filtered by RUST_LOG
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(fps) = self.fps {
            config.frame_rate = fps;
        }
        if self.wrap {
            config.boundary = Boundary::Wrap;
        }
        if self.collisions {
            config.collisions = CollisionPolicy::GameOver;
        }
        if let Some(path) = self.score_file {
            config.score_path = path;
        }
        if let Some(path) = self.audio {
            config.audio_path = path;
        }
        if let Some(path) = self.font {
            config.font_path = path;
        }

        config.validate()?;
        Ok(config)
    }
}

/// The terminal belongs to the game, so logs only go to a file
fn init_logging(path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    if let Some(path) = cli.log_file.take() {
        init_logging(&path)?;
    }

    let config = cli.into_config()?;
    tracing::info!(?config, "starting");

    // A missing soundtrack is fatal; a missing sound device is not
    let track = MusicTrack::load(&config.audio_path)?;
    let music = BackgroundMusic::try_start(&track);

    let mut human_mode = HumanMode::new(config, music);
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_match_defaults() {
        let cli = Cli::parse_from(["snake_xenzia"]);
        assert_eq!(cli.into_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let cli = Cli::parse_from([
            "snake_xenzia",
            "--width",
            "30",
            "--tick-ms",
            "80",
            "--wrap",
            "--collisions",
            "--score-file",
            "best.txt",
        ]);
        let config = cli.into_config().unwrap();

        assert_eq!(config.grid_width, 30);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.tick_interval_ms, 80);
        assert_eq!(config.boundary, Boundary::Wrap);
        assert_eq!(config.collisions, CollisionPolicy::GameOver);
        assert_eq!(config.score_path, PathBuf::from("best.txt"));
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let cli = Cli::parse_from(["snake_xenzia", "--height", "0"]);
        assert!(cli.into_config().is_err());
    }

    #[test]
    fn test_board_too_small_for_start_rejected() {
        let cli = Cli::parse_from([
            "snake_xenzia",
            "--width",
            "3",
            "--height",
            "3",
            "--collisions",
        ]);
        let err = cli.into_config().unwrap_err();
        assert!(err.to_string().contains("start position (5, 5)"));
    }
}
