use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use std::path::Path;
use tracing::warn;

use crate::game::{GameState, Position};
use crate::metrics::GameMetrics;

/// Text style for the score line
///
/// The terminal draws glyphs with its own font, so the font asset only picks
/// between the decorated HUD and the terminal's default look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudStyle {
    Styled,
    Plain,
}

impl HudStyle {
    /// `Styled` when the font asset exists; a missing font is not an error
    pub fn detect(font_path: &Path) -> Self {
        if font_path.is_file() {
            HudStyle::Styled
        } else {
            warn!(path = ?font_path, "font asset missing, using default text style");
            HudStyle::Plain
        }
    }

    fn label(&self) -> Style {
        match self {
            HudStyle::Styled => Style::default().fg(Color::Yellow),
            HudStyle::Plain => Style::default(),
        }
    }

    fn value(&self) -> Style {
        match self {
            HudStyle::Styled => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            HudStyle::Plain => Style::default(),
        }
    }
}

pub struct Renderer {
    hud: HudStyle,
}

impl Renderer {
    pub fn new(hud: HudStyle) -> Self {
        Self { hud }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Score line
                Constraint::Length(1), // Controls
            ])
            .split(frame.area());

        // Render game grid or game over screen
        if state.is_alive {
            let grid = self.render_grid(state);
            frame.render_widget(grid, chunks[0]);
        } else {
            let game_over = self.render_game_over(state, metrics);
            frame.render_widget(game_over, chunks[0]);
        }

        let scores = self.render_scores(state, metrics);
        frame.render_widget(scores, chunks[1]);

        let controls = self.render_controls(state);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid_height);

        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake Xenzia "),
            )
            .alignment(Alignment::Center)
    }

    fn render_scores(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Score: ", self.hud.label()),
            Span::styled(state.score.to_string(), self.hud.value()),
            Span::raw("   "),
            Span::styled("High Score: ", self.hud.label()),
            Span::styled(state.high_score.to_string(), self.hud.value()),
            Span::raw("   "),
            Span::styled("Time: ", self.hud.label()),
            Span::styled(metrics.format_time(), self.hud.value()),
            Span::raw("   "),
            Span::styled("Games: ", self.hud.label()),
            Span::styled(metrics.games_played.to_string(), self.hud.value()),
            Span::raw("   "),
            Span::styled("Eaten: ", self.hud.label()),
            Span::styled(metrics.food_eaten.to_string(), self.hud.value()),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        // A record set this game leaves score and high score equal
        let headline = if state.score > 0 && state.score == state.high_score {
            Span::styled(
                "NEW HIGH SCORE",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )
        };

        let text = vec![
            Line::from(""),
            Line::from(headline),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", self.hud.label()),
                Span::styled(state.score.to_string(), self.hud.value()),
            ]),
            Line::from(vec![
                Span::styled("High Score: ", self.hud.label()),
                Span::styled(state.high_score.to_string(), self.hud.value()),
            ]),
            Line::from(vec![
                Span::styled("Length: ", self.hud.label()),
                Span::styled(state.snake.len().to_string(), self.hud.value()),
                Span::raw("   "),
                Span::styled("Survived: ", self.hud.label()),
                Span::styled(metrics.format_time(), self.hud.value()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ];
        if !state.is_alive {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("R", Style::default().fg(Color::Green)));
            spans.push(Span::raw(" to restart"));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(HudStyle::Plain)
    }
}
