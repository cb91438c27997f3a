//! Interactive play mode.
//!
//! One [`Session`] is one world handle plus the frontend state around it
//! (staged heading, pause flag, derived cell size). The async loop in
//! [`PlayMode::run`] is the only mutator of the simulation; key handlers
//! just stage the next heading (latest press wins) and the tick consumes
//! it. The session loop owns the world and its timers, so returning from
//! it releases both before the next session is built.

use std::io::{stderr, Stderr};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use rand::Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::{interval, sleep, Instant};
use tracing::info;

use crate::config::{clamp_width, AppConfig};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::{FrameView, Painter};
use crate::view::{cell_size, RESIZE_DEBOUNCE};
use crate::world::{Direction, GameStatus, World};

/// Why a session loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    /// Leave the program.
    Quit,
    /// Same configuration, fresh world.
    Restart,
    /// Rebuild with a different world width.
    Reconfigure { width: u32 },
}

/// One game session: a world handle and the frontend state around it.
struct Session {
    world: World,
    initial_length: u32,
    staged_heading: Option<Direction>,
    paused: bool,
    cell_size: u16,
}

impl Session {
    /// Build a session for `config` on a terminal `cols` wide. The snake
    /// spawns on a random cell heading Right, and the session starts
    /// paused until Space starts it.
    fn new(config: &AppConfig, cols: u16) -> Self {
        let size = config.world_width * config.world_width;
        let spawn_idx = rand::thread_rng().gen_range(0..size);
        info!(width = config.world_width, spawn_idx, "building session");

        Self {
            world: World::new(
                config.world_width,
                spawn_idx,
                config.initial_snake_length,
                Direction::Right,
            ),
            initial_length: config.initial_snake_length,
            staged_heading: None,
            paused: true,
            cell_size: cell_size(cols, config.world_width),
        }
    }

    /// Latest keypress wins until the next tick consumes the staged value.
    fn stage_heading(&mut self, heading: Direction) {
        self.staged_heading = Some(heading);
    }

    /// One frame-loop tick: hand the staged heading to the simulation,
    /// then advance it. Does nothing while paused or after the session
    /// ended.
    fn advance_tick(&mut self, metrics: &mut SessionMetrics) {
        if self.paused || self.world.status() != GameStatus::Playing {
            return;
        }
        if let Some(heading) = self.staged_heading.take() {
            self.world.change_snake_direction(heading);
        }
        self.world.update();
        if self.world.status() != GameStatus::Playing {
            metrics.on_game_over(self.score());
        }
    }

    /// Cells grown since spawn.
    fn score(&self) -> u32 {
        self.world.snake_length() as u32 - self.initial_length
    }

    /// Map a key action onto the session; `Some` ends the session loop.
    fn apply(&mut self, action: KeyAction) -> Option<SessionExit> {
        match action {
            KeyAction::Steer(heading) => {
                self.stage_heading(heading);
                None
            }
            KeyAction::TogglePause => {
                self.paused = !self.paused;
                None
            }
            KeyAction::Restart => Some(SessionExit::Restart),
            KeyAction::WidenWorld => self.reconfigure(self.world.width() + 1),
            KeyAction::NarrowWorld => self.reconfigure(self.world.width().saturating_sub(1)),
            KeyAction::Quit => Some(SessionExit::Quit),
            KeyAction::None => None,
        }
    }

    /// Width changes rebuild the session; a change clamped back to the
    /// current width is ignored.
    fn reconfigure(&self, width: u32) -> Option<SessionExit> {
        let width = clamp_width(width);
        (width != self.world.width()).then_some(SessionExit::Reconfigure { width })
    }

    fn view(&self) -> FrameView<'_> {
        FrameView {
            world: &self.world,
            cell_size: self.cell_size,
            paused: self.paused,
            score: self.score(),
        }
    }
}

/// Keyboard-controlled play on the terminal.
pub struct PlayMode {
    config: AppConfig,
    metrics: SessionMetrics,
    input: InputHandler,
    painter: Painter,
}

impl PlayMode {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            metrics: SessionMetrics::new(),
            input: InputHandler::new(),
            painter: Painter::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_sessions(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;
        result
    }

    /// Outer loop: one iteration per session. `run_session` owns the world
    /// and its timers, so both are gone before the next session is built.
    async fn run_sessions(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        loop {
            self.metrics.on_session_start();
            match self.run_session(terminal).await? {
                SessionExit::Quit => break,
                SessionExit::Restart => {}
                SessionExit::Reconfigure { width } => {
                    info!(width, "reconfiguring world width");
                    self.config.world_width = width;
                    self.config.initial_snake_length =
                        self.config.initial_snake_length.min(width);
                }
            }
        }
        Ok(())
    }

    async fn run_session(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<SessionExit> {
        let cols = terminal.size().context("Failed to read terminal size")?.width;
        let mut session = Session::new(&self.config, cols);

        let mut events = EventStream::new();
        let mut ticks = interval(Duration::from_millis(self.config.tick_interval_ms()));

        // Resize bursts coalesce until the terminal stays quiet for the
        // debounce window.
        let debounce = sleep(RESIZE_DEBOUNCE);
        tokio::pin!(debounce);
        let mut pending_cols: Option<u16> = None;

        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                if let Some(exit) = session.apply(self.input.handle_key_event(key)) {
                                    return Ok(exit);
                                }
                            }
                            Event::Resize(new_cols, _) => {
                                pending_cols = Some(new_cols);
                                debounce.as_mut().reset(Instant::now() + RESIZE_DEBOUNCE);
                            }
                            _ => {}
                        }
                    }
                }

                _ = ticks.tick() => {
                    session.advance_tick(&mut self.metrics);
                    self.metrics.tick();
                    let view = session.view();
                    terminal
                        .draw(|frame| self.painter.render(frame, &view, &self.metrics))
                        .context("Failed to draw frame")?;
                }

                () = &mut debounce, if pending_cols.is_some() => {
                    if let Some(new_cols) = pending_cols.take() {
                        session.cell_size = cell_size(new_cols, session.world.width());
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    return Ok(SessionExit::Quit);
                }
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_WORLD_WIDTH;

    fn session(width: u32) -> Session {
        Session::new(&AppConfig::new(width), 80)
    }

    #[test]
    fn test_steering_stages_without_touching_the_world() {
        let mut session = session(8);

        assert_eq!(session.apply(KeyAction::Steer(Direction::Up)), None);

        assert_eq!(session.staged_heading, Some(Direction::Up));
        assert_eq!(session.world.heading(), Direction::Right);
    }

    #[test]
    fn test_latest_keypress_wins() {
        let mut session = session(8);
        session.paused = false;
        let mut metrics = SessionMetrics::new();

        // Up then Down before the tick: Down is what the tick applies.
        session.stage_heading(Direction::Up);
        session.stage_heading(Direction::Down);
        assert_eq!(session.staged_heading, Some(Direction::Down));

        session.advance_tick(&mut metrics);

        assert_eq!(session.world.heading(), Direction::Down);
        assert_eq!(session.staged_heading, None);
    }

    #[test]
    fn test_paused_session_does_not_tick() {
        let mut session = session(8);
        assert!(session.paused);
        let head = session.world.head_cell();
        let mut metrics = SessionMetrics::new();

        session.advance_tick(&mut metrics);

        assert_eq!(session.world.head_cell(), head);
    }

    #[test]
    fn test_score_counts_growth_only() {
        let session = session(8);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_quit_and_restart_end_the_session() {
        let mut session = session(8);

        assert_eq!(session.apply(KeyAction::Quit), Some(SessionExit::Quit));
        assert_eq!(session.apply(KeyAction::Restart), Some(SessionExit::Restart));
        assert_eq!(session.apply(KeyAction::None), None);
    }

    #[test]
    fn test_reconfigure_steps_the_width() {
        let mut session = session(10);

        assert_eq!(
            session.apply(KeyAction::WidenWorld),
            Some(SessionExit::Reconfigure { width: 11 })
        );
        assert_eq!(
            session.apply(KeyAction::NarrowWorld),
            Some(SessionExit::Reconfigure { width: 9 })
        );
    }

    #[test]
    fn test_reconfigure_clamps_at_the_bounds() {
        let mut session = session(MAX_WORLD_WIDTH);

        assert_eq!(session.apply(KeyAction::WidenWorld), None);
        assert_eq!(
            session.apply(KeyAction::NarrowWorld),
            Some(SessionExit::Reconfigure {
                width: MAX_WORLD_WIDTH - 1
            })
        );
    }

    #[test]
    fn test_pause_toggles() {
        let mut session = session(8);

        assert_eq!(session.apply(KeyAction::TogglePause), None);
        assert!(!session.paused);
        assert_eq!(session.apply(KeyAction::TogglePause), None);
        assert!(session.paused);
    }
}
