//! Pipe geometry and randomised spawning.

use rand::Rng;

use crate::collision::Rect;
use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Left edge.
    pub x: f64,
    pub width: f64,
    /// Height of the top segment, which runs down from the ceiling.
    pub top_height: f64,
    /// Where the bottom segment starts; it runs to the floor.
    pub bottom_y: f64,
    /// Set once the bird has cleared this pipe; never cleared again.
    pub passed: bool,
}

impl Pipe {
    /// A fresh pipe at the right edge of the screen with its opening centred
    /// on `gap_center`.
    pub fn with_gap_center(config: &GameConfig, gap_center: f64) -> Self {
        let half_gap = config.pipe_gap / 2.0;
        Self {
            x: config.screen_width,
            width: config.pipe_width,
            top_height: gap_center - half_gap,
            bottom_y: gap_center + half_gap,
            passed: false,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top_segment(&self) -> Rect {
        Rect::new(self.x, 0.0, self.width, self.top_height)
    }

    pub fn bottom_segment(&self, screen_height: f64) -> Rect {
        Rect::new(self.x, self.bottom_y, self.width, screen_height - self.bottom_y)
    }

    /// True once the trailing edge has left the screen.
    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Bounds of the gap centre such that both segments keep at least
/// `min_segment_height`.
pub fn gap_center_range(config: &GameConfig) -> (i64, i64) {
    let half_gap = (config.pipe_gap / 2.0).floor() as i64;
    let margin = config.min_segment_height as i64;
    let min = half_gap + margin;
    let max = (config.screen_height as i64 - half_gap - margin).max(min);
    (min, max)
}

pub fn spawn_pipe<R: Rng>(config: &GameConfig, rng: &mut R) -> Pipe {
    let (min, max) = gap_center_range(config);
    let gap_center = rng.gen_range(min..=max);
    Pipe::with_gap_center(config, gap_center as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_geometry_from_gap_center() {
        let config = GameConfig::default();
        let pipe = Pipe::with_gap_center(&config, 300.0);
        assert_eq!(pipe.top_height, 225.0);
        assert_eq!(pipe.bottom_y, 375.0);
        assert_eq!(pipe.x, 400.0);
        assert_eq!(pipe.width, 60.0);
        assert!(!pipe.passed);
    }

    #[test]
    fn test_gap_center_range_default() {
        assert_eq!(gap_center_range(&GameConfig::default()), (125, 475));
    }

    #[test]
    fn test_spawned_segments_keep_minimum_height() {
        let config = GameConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let pipe = spawn_pipe(&config, &mut rng);
            assert!(pipe.top_height >= 50.0);
            assert!(config.screen_height - pipe.bottom_y >= 50.0);
            assert_eq!(pipe.bottom_y - pipe.top_height, config.pipe_gap);
        }
    }

    #[test]
    fn test_range_collapses_on_tiny_screen() {
        let config = GameConfig {
            screen_height: 200.0,
            ..GameConfig::default()
        };
        let (min, max) = gap_center_range(&config);
        assert_eq!(min, max);
    }

    #[test]
    fn test_offscreen_only_after_trailing_edge_leaves() {
        let mut pipe = Pipe::with_gap_center(&GameConfig::default(), 300.0);
        pipe.x = -59.0;
        assert!(!pipe.is_offscreen());
        pipe.x = -60.0;
        assert!(pipe.is_offscreen());
    }
}
