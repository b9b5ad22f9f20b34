//! Per-frame motion of the bird and the pipes.
//!
//! Everything here is a pure function over `Copy` values: the caller owns
//! the state and decides what to keep.

use crate::collision::Rect;
use crate::config::GameConfig;
use crate::obstacle::Pipe;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Left edge; fixed for the whole run.
    pub x: f64,
    /// Top edge; 0 is the ceiling.
    pub y: f64,
    /// Positive is downward.
    pub velocity: f64,
    pub width: f64,
    pub height: f64,
}

impl Bird {
    /// A bird at the spawn point, at rest.
    pub fn spawn(config: &GameConfig) -> Self {
        Self {
            x: config.bird_x,
            y: config.bird_y,
            velocity: 0.0,
            width: config.bird_width,
            height: config.bird_height,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// One gravity step. The ceiling stops the bird dead; the floor is not
/// clamped here because reaching it ends the run.
pub fn advance_bird(bird: Bird, gravity: f64) -> Bird {
    let mut velocity = bird.velocity + gravity;
    let mut y = bird.y + velocity;
    if y < 0.0 {
        y = 0.0;
        velocity = 0.0;
    }
    Bird { y, velocity, ..bird }
}

pub fn jump(bird: Bird, impulse: f64) -> Bird {
    Bird {
        velocity: impulse,
        ..bird
    }
}

pub fn advance_pipe(pipe: Pipe, speed: f64) -> Pipe {
    Pipe {
        x: pipe.x - speed,
        ..pipe
    }
}
