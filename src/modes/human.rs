use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

use crate::audio::BackgroundMusic;
use crate::game::{GameConfig, GameEngine, GameState, TickClock};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{HudStyle, Renderer};
use crate::storage::HighScoreFile;

/// Keyboard-driven play session
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    clock: TickClock,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    scores: HighScoreFile,
    music: Option<BackgroundMusic>,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, music: Option<BackgroundMusic>) -> Self {
        let scores = HighScoreFile::new(config.score_path.clone());
        let high_score = scores.load();
        info!(high_score, path = ?scores.path(), "loaded high score");

        let renderer = Renderer::new(HudStyle::detect(&config.font_path));
        let clock = TickClock::new(config.tick_interval());
        let mut engine = GameEngine::new(config);
        let state = engine.reset(high_score);

        Self {
            engine,
            state,
            clock,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            scores,
            music,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(self.engine.config().frame_interval());
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Advance by the measured frame time, then draw
                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    self.advance(now.duration_since(last_frame));
                    last_frame = now;

                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                self.engine.steer(&mut self.state, direction);
            }
            KeyAction::Restart => {
                if !self.state.is_alive {
                    self.reset_game();
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// Feed one frame's elapsed time into the tick clock
    fn advance(&mut self, delta: Duration) {
        if self.clock.advance(delta) {
            self.update_game();
        }
    }

    fn update_game(&mut self) {
        let result = self.engine.step(&mut self.state);

        if result.info.ate_food {
            self.metrics.on_food_eaten();
            debug!(score = self.state.score, length = self.state.snake.len(), "food eaten");
        }
        if result.info.new_record {
            self.persist_high_score();
        }
    }

    fn persist_high_score(&self) {
        match self.scores.save(self.state.high_score) {
            Ok(()) => info!(high_score = self.state.high_score, "new high score"),
            Err(err) => warn!("{err:#}"),
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset(self.state.high_score);
        self.clock.reset();
        self.metrics.on_game_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        if let Some(music) = self.music.take() {
            music.stop();
        }
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
