//! Axis-aligned overlap tests.

use crate::obstacle::Pipe;
use crate::physics::Bird;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Edges that merely touch do not count; an empty rect overlaps nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

pub fn collides(pipe: &Pipe, bird: &Bird, screen_height: f64) -> bool {
    let body = bird.bounds();
    body.intersects(&pipe.top_segment()) || body.intersects(&pipe.bottom_segment(screen_height))
}

pub fn hits_ground(bird: &Bird, screen_height: f64) -> bool {
    bird.bottom() >= screen_height
}
