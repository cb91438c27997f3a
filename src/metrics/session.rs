use std::time::{Duration, Instant};

/// Bookkeeping the frontend keeps across game sessions.
pub struct SessionMetrics {
    started: Instant,
    elapsed: Duration,
    best_score: u32,
    sessions_played: u32,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            elapsed: Duration::ZERO,
            best_score: 0,
            sessions_played: 0,
        }
    }

    /// Refresh the elapsed clock; called once per frame.
    pub fn tick(&mut self) {
        self.elapsed = self.started.elapsed();
    }

    /// A fresh session started; the clock restarts.
    pub fn on_session_start(&mut self) {
        self.started = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    /// A session ended with the given score.
    pub fn on_game_over(&mut self, score: u32) {
        self.sessions_played += 1;
        self.best_score = self.best_score.max(score);
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn sessions_played(&self) -> u32 {
        self.sessions_played
    }

    /// Elapsed session time as mm:ss.
    pub fn format_elapsed(&self) -> String {
        let secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_formatting() {
        let mut metrics = SessionMetrics::new();

        metrics.elapsed = Duration::from_secs(125);
        assert_eq!(metrics.format_elapsed(), "02:05");

        metrics.elapsed = Duration::ZERO;
        assert_eq!(metrics.format_elapsed(), "00:00");

        metrics.elapsed = Duration::from_secs(3661);
        assert_eq!(metrics.format_elapsed(), "61:01");
    }

    #[test]
    fn test_best_score_never_decreases() {
        let mut metrics = SessionMetrics::new();

        metrics.on_game_over(7);
        assert_eq!(metrics.best_score(), 7);
        assert_eq!(metrics.sessions_played(), 1);

        metrics.on_game_over(3);
        assert_eq!(metrics.best_score(), 7);
        assert_eq!(metrics.sessions_played(), 2);

        metrics.on_game_over(12);
        assert_eq!(metrics.best_score(), 12);
    }

    #[test]
    fn test_session_start_resets_the_clock() {
        let mut metrics = SessionMetrics::new();
        metrics.elapsed = Duration::from_secs(30);

        metrics.on_session_start();

        assert_eq!(metrics.format_elapsed(), "00:00");
    }
}
