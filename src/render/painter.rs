use std::collections::HashSet;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::metrics::SessionMetrics;
use crate::world::{GameStatus, World};

/// Presentation inputs for one frame.
pub struct FrameView<'a> {
    pub world: &'a World,
    /// Columns per grid cell.
    pub cell_size: u16,
    pub paused: bool,
    /// Cells grown since spawn.
    pub score: u32,
}

/// Paints the whole frame from current simulation state. No partial
/// redraw: every cell, the reward and every snake segment are rebuilt
/// each call.
pub struct Painter;

impl Painter {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &FrameView, metrics: &SessionMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // stats
                Constraint::Min(0),    // board
                Constraint::Length(1), // controls
            ])
            .split(frame.area());

        frame.render_widget(self.stats_line(view, metrics), chunks[0]);

        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match view.world.status() {
            GameStatus::Playing => frame.render_widget(self.board(view), board_area),
            GameStatus::Won | GameStatus::Lost => {
                frame.render_widget(self.endscreen(view), board_area)
            }
        }

        frame.render_widget(self.controls_line(), chunks[2]);
    }

    /// The board: one line per row, one fixed-width span per cell.
    fn board(&self, view: &FrameView) -> Paragraph<'static> {
        let width = view.world.width();
        let cell = usize::from(view.cell_size.max(1));
        let occupied: HashSet<u32> = view.world.snake_cells().iter().copied().collect();
        let head = view.world.head_cell();
        let reward = view.world.reward_cell();

        let mut lines = Vec::with_capacity(width as usize);
        for row in 0..width {
            let mut spans = Vec::with_capacity(width as usize);
            for col in 0..width {
                let idx = row * width + col;
                let (glyph, style) = if idx == head {
                    (
                        "█",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if occupied.contains(&idx) {
                    ("█", Style::default().fg(Color::Green))
                } else if reward == Some(idx) {
                    (
                        "●",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("·", Style::default().fg(Color::DarkGray))
                };
                spans.push(Span::styled(format!("{glyph:<cell$}"), style));
            }
            lines.push(Line::from(spans));
        }

        let title = if view.paused {
            " Snake [paused] "
        } else {
            " Snake "
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn stats_line(&self, view: &FrameView, metrics: &SessionMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(view.score.to_string(), value),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(view.world.snake_length().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_elapsed(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score().to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn endscreen(&self, view: &FrameView) -> Paragraph<'static> {
        let (headline, color) = match view.world.status() {
            GameStatus::Won => ("YOU WON", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
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
                .border_style(Style::default().fg(color)),
        )
    }

    fn controls_line(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" steer | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" start/pause | "),
            Span::styled("+/-", Style::default().fg(Color::Cyan)),
            Span::raw(" world size | "),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Painter {
    fn default() -> Self {
        Self::new()
    }
}
