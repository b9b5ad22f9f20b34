//! World constants and file locations.

use std::path::PathBuf;
use std::time::Duration;

use crate::leaderboard;

/// Every tunable number of the game world, in world units (the playfield is
/// `screen_width` x `screen_height`, y grows downward) and frames.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub screen_width: f64,
    pub screen_height: f64,
    /// Added to the bird's vertical velocity every frame.
    pub gravity: f64,
    /// Velocity a jump sets (not adds); negative is upward.
    pub jump_velocity: f64,
    /// Horizontal distance every pipe travels per frame.
    pub pipe_speed: f64,
    pub pipe_width: f64,
    /// Vertical opening between the two segments of a pipe.
    pub pipe_gap: f64,
    /// Shortest allowed top or bottom segment.
    pub min_segment_height: f64,
    /// Monotonic time between two pipe spawns.
    pub pipe_frequency_ms: u64,
    /// Delay before the first pipe of a run appears.
    pub first_pipe_delay_ms: u64,
    pub bird_x: f64,
    pub bird_y: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub leaderboard_capacity: usize,
    pub frame_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 400.0,
            screen_height: 600.0,
            gravity: 0.25,
            jump_velocity: -7.0,
            pipe_speed: 3.0,
            pipe_width: 60.0,
            pipe_gap: 150.0,
            min_segment_height: 50.0,
            pipe_frequency_ms: 1500,
            first_pipe_delay_ms: 500,
            bird_x: 100.0,
            bird_y: 300.0,
            bird_width: 30.0,
            bird_height: 30.0,
            leaderboard_capacity: leaderboard::DEFAULT_CAPACITY,
            frame_rate: 60,
        }
    }
}

impl GameConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.frame_rate.max(1)))
    }
}

/// Where the durable records live. All paths are relative to the working
/// directory the game is started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub high_score: PathBuf,
    pub leaderboard: PathBuf,
    pub log: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self {
            high_score: PathBuf::from("highscore.txt"),
            leaderboard: PathBuf::from("leaderboard.json"),
            log: PathBuf::from("flappy.log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_world_constants() {
        let c = GameConfig::default();
        assert_eq!(c.screen_width, 400.0);
        assert_eq!(c.screen_height, 600.0);
        assert!((c.gravity - 0.25).abs() < f64::EPSILON);
        assert!((c.jump_velocity - (-7.0)).abs() < f64::EPSILON);
        assert_eq!(c.pipe_frequency_ms, 1500);
        assert_eq!(c.leaderboard_capacity, 5);
    }

    #[test]
    fn test_frame_duration_60hz() {
        let c = GameConfig::default();
        assert_eq!(c.frame_duration(), Duration::from_micros(16_666));
    }

    #[test]
    fn test_default_paths_are_relative() {
        let p = StoragePaths::default();
        assert!(p.high_score.is_relative());
        assert_eq!(p.leaderboard, PathBuf::from("leaderboard.json"));
    }
}
