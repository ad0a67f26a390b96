//! Puck and paddle bodies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rink::Rink;
use crate::consts::*;

/// Which half of the rink a paddle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Lower half, defends the bottom goal (player 1)
    Home,
    /// Upper half, defends the top goal (player 2 or the AI)
    Away,
}

impl Side {
    /// Player controlling this side
    pub fn player(self) -> Player {
        match self {
            Side::Home => Player::One,
            Side::Away => Player::Two,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Player identity as reported to the scoring layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn side(self) -> Side {
        match self {
            Player::One => Side::Home,
            Player::Two => Side::Away,
        }
    }
}

/// The puck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puck {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    /// Units per reference tick
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
}

impl Puck {
    /// Puck resting at the centre of the rink
    pub fn new(rink: &Rink, mass: f32) -> Self {
        let center = rink.center();
        Self {
            pos: center,
            prev_pos: center,
            vel: Vec2::ZERO,
            radius: rink.puck_radius(),
            mass: positive_or(mass, PUCK_MASS),
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Put the puck back on the centre spot at rest
    pub fn recenter(&mut self, rink: &Rink) {
        self.pos = rink.center();
        self.prev_pos = self.pos;
        self.vel = Vec2::ZERO;
    }
}

/// A paddle (mallet). Paddles have no stored velocity; it is derived from `pos - prev_pos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Base speed in units per reference tick at the reference rink width
    pub speed: f32,
}

impl Paddle {
    pub fn new(side: Side, rink: &Rink, mass: f32, speed: f32) -> Self {
        let start = rink.paddle_start(side);
        Self {
            side,
            pos: start,
            prev_pos: start,
            radius: rink.paddle_radius(),
            mass: positive_or(mass, PADDLE_MASS),
            speed: positive_or(speed, PADDLE_SPEED),
        }
    }

    /// Record the current position as this frame's starting point
    #[inline]
    pub fn snapshot(&mut self) {
        self.prev_pos = self.pos;
    }

    /// Displacement over the current frame
    #[inline]
    pub fn displacement(&self) -> Vec2 {
        self.pos - self.prev_pos
    }

    /// Top speed on this rink in units per reference tick
    #[inline]
    pub fn scaled_speed(&self, rink: &Rink) -> f32 {
        self.speed * rink.scale()
    }

    /// Move back to the starting spot
    pub fn reset(&mut self, rink: &Rink) {
        self.pos = rink.paddle_start(self.side);
        self.prev_pos = self.pos;
    }

    /// Keep the paddle inside its half
    pub fn confine(&mut self, rink: &Rink) {
        self.pos = rink.clamp_to_half(self.side, self.radius, self.pos);
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
