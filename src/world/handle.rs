use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

use super::direction::Direction;

/// Lifecycle state of a simulation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The snake is alive and ticking.
    Playing,
    /// The snake fills the grid.
    Won,
    /// The snake ran into itself.
    Lost,
}

/// Handle to one simulation session.
///
/// The grid is `width * width` cells addressed row-major by a single `u32`
/// index. Consumers read state through [`World::snake_cells`],
/// [`World::reward_cell`] and [`World::status`]; the only mutations are
/// [`World::update`] (one tick) and [`World::change_snake_direction`].
pub struct World {
    width: u32,
    /// Snake cells, head first.
    snake: Vec<u32>,
    heading: Direction,
    reward: Option<u32>,
    status: GameStatus,
    rng: ThreadRng,
}

impl World {
    /// Create a session: a snake of `initial_length` cells with its head at
    /// `spawn_idx` and its body laid out opposite `heading`, plus one
    /// reward cell off the snake.
    ///
    /// `spawn_idx` must address a cell and `initial_length` must be in
    /// `1..=width` so the body fits one row of the grid.
    pub fn new(width: u32, spawn_idx: u32, initial_length: u32, heading: Direction) -> Self {
        debug_assert!(spawn_idx < width * width);
        debug_assert!((1..=width).contains(&initial_length));

        let mut snake = Vec::with_capacity(initial_length as usize);
        let mut cell = spawn_idx;
        for _ in 0..initial_length {
            snake.push(cell);
            cell = heading.opposite().step(cell, width);
        }

        let mut world = Self {
            width,
            snake,
            heading,
            reward: None,
            status: GameStatus::Playing,
            rng: rand::thread_rng(),
        };
        world.reward = Some(world.spawn_reward());
        world
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Snake cells, head first: the borrowed view into the session's cell
    /// buffer.
    pub fn snake_cells(&self) -> &[u32] {
        &self.snake
    }

    pub fn snake_length(&self) -> usize {
        self.snake.len()
    }

    pub fn head_cell(&self) -> u32 {
        self.snake[0]
    }

    /// The current reward cell, or `None` once the snake fills the grid.
    pub fn reward_cell(&self) -> Option<u32> {
        self.reward
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Apply a heading change. Reversals of the current heading are
    /// rejected; a terminated session ignores the call.
    pub fn change_snake_direction(&mut self, heading: Direction) {
        if self.status != GameStatus::Playing {
            return;
        }
        if heading.is_opposite(self.heading) {
            debug!(?heading, current = ?self.heading, "rejecting heading reversal");
            return;
        }
        self.heading = heading;
    }

    /// Advance the simulation one tick.
    ///
    /// Moves the head one cell in the current heading (wrapping at the
    /// edges), terminates on self-collision, grows through a reward and
    /// relocates it. No-op once the session is over.
    pub fn update(&mut self) {
        if self.status != GameStatus::Playing {
            return;
        }

        let next = self.heading.step(self.snake[0], self.width);
        if self.snake.contains(&next) {
            info!(cell = next, length = self.snake.len(), "snake ran into itself");
            self.status = GameStatus::Lost;
            return;
        }

        let ate = self.reward == Some(next);
        self.snake.insert(0, next);
        if !ate {
            self.snake.pop();
            return;
        }

        debug!(cell = next, length = self.snake.len(), "reward consumed");
        if self.snake.len() as u32 == self.width * self.width {
            info!("snake fills the grid");
            self.status = GameStatus::Won;
            self.reward = None;
        } else {
            self.reward = Some(self.spawn_reward());
        }
    }

    /// Pick a uniformly random cell the snake does not occupy.
    ///
    /// Callers guarantee at least one free cell.
    fn spawn_reward(&mut self) -> u32 {
        let size = self.width * self.width;
        loop {
            let cell = self.rng.gen_range(0..size);
            if !self.snake.contains(&cell) {
                return cell;
            }
        }
    }
}

impl Drop for World {
    fn drop(&mut self) {
        debug!(width = self.width, "world released");
    }
}
