use serde::{Deserialize, Serialize};

/// Smallest world the frontend will build.
pub const MIN_WORLD_WIDTH: u32 = 4;
/// Largest world the frontend will build; wider boards stop fitting a terminal.
pub const MAX_WORLD_WIDTH: u32 = 48;

/// Frontend configuration for one run of the program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Width of the square world grid, in cells
    pub world_width: u32,
    /// Initial snake length, in cells
    pub initial_snake_length: u32,
    /// Simulation ticks (and repaints) per second
    pub tick_hz: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world_width: 10,
            initial_snake_length: 3,
            tick_hz: 10,
        }
    }
}

impl AppConfig {
    /// Create a configuration for a world of the given width.
    pub fn new(world_width: u32) -> Self {
        Self {
            world_width: clamp_width(world_width),
            ..Default::default()
        }
    }

    /// Set the initial snake length. The body must fit in one row of the
    /// grid, so the length is clamped to `1..=world_width`.
    pub fn with_snake_length(mut self, length: u32) -> Self {
        self.initial_snake_length = length.clamp(1, self.world_width);
        self
    }

    /// Set the tick rate, at least 1 Hz.
    pub fn with_tick_hz(mut self, tick_hz: u32) -> Self {
        self.tick_hz = tick_hz.max(1);
        self
    }

    /// Milliseconds between ticks, never zero.
    pub fn tick_interval_ms(&self) -> u64 {
        (1000 / u64::from(self.tick_hz)).max(1)
    }
}

/// Clamp a requested world width to the supported range.
pub fn clamp_width(width: u32) -> u32 {
    width.clamp(MIN_WORLD_WIDTH, MAX_WORLD_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.world_width, 10);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.tick_hz, 10);
    }

    #[test]
    fn test_width_is_clamped() {
        assert_eq!(AppConfig::new(2).world_width, MIN_WORLD_WIDTH);
        assert_eq!(AppConfig::new(100).world_width, MAX_WORLD_WIDTH);
        assert_eq!(AppConfig::new(12).world_width, 12);
    }

    #[test]
    fn test_snake_length_fits_the_grid() {
        let config = AppConfig::new(10).with_snake_length(0);
        assert_eq!(config.initial_snake_length, 1);

        let config = AppConfig::new(10).with_snake_length(99);
        assert_eq!(config.initial_snake_length, 10);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(AppConfig::default().tick_interval_ms(), 100);
        assert_eq!(AppConfig::default().with_tick_hz(0).tick_interval_ms(), 1000);
        assert_eq!(AppConfig::default().with_tick_hz(4).tick_interval_ms(), 250);
        assert_eq!(AppConfig::default().with_tick_hz(5000).tick_interval_ms(), 1);
    }
}
