//! Motion integration for paddles and the puck
//!
//! Rates are per reference tick; a frame of `elapsed_ms` advances
//! `elapsed_ms / REFERENCE_TICK_MS` ticks in a single step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Paddle, Puck};
use super::rink::Rink;
use crate::consts::VELOCITY_EPSILON;
use crate::frame_scale;

/// Pressed-direction state for one paddle, sampled at tick time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl PaddleInput {
    /// Movement direction with unit length (or zero). Screen coordinates: up is -y.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        // Only a diagonal needs normalising; axis moves are already unit length
        if dir.x != 0.0 && dir.y != 0.0 {
            dir = dir.normalize();
        }
        dir
    }

    pub fn is_idle(&self) -> bool {
        self.direction() == Vec2::ZERO
    }
}

/// Advance a human-controlled paddle one frame and keep it on its half
pub fn move_paddle(paddle: &mut Paddle, input: &PaddleInput, elapsed_ms: f32, rink: &Rink) {
    paddle.snapshot();

    let step = paddle.scaled_speed(rink) * frame_scale(elapsed_ms);
    paddle.pos += input.direction() * step;
    paddle.confine(rink);
}

/// Apply friction and advance the puck one frame. No collision handling.
pub fn integrate_puck(puck: &mut Puck, elapsed_ms: f32, friction: f32) {
    puck.prev_pos = puck.pos;
    let ticks = frame_scale(elapsed_ms);

    puck.vel *= friction.powf(ticks);
    if puck.vel.x.abs() < VELOCITY_EPSILON {
        puck.vel.x = 0.0;
    }
    if puck.vel.y.abs() < VELOCITY_EPSILON {
        puck.vel.y = 0.0;
    }

    puck.pos += puck.vel * ticks;
}

/// Scale the puck's velocity down to `limit` if it is faster. Direction is kept.
pub fn limit_speed(puck: &mut Puck, limit: f32) {
    let speed = puck.speed();
    if speed > limit && speed > 0.0 {
        puck.vel *= limit / speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::body::Side;

    fn rink() -> Rink {
        Rink::new(500.0, 900.0)
    }

    #[test]
    fn test_input_direction_diagonal_is_unit() {
        let input = PaddleInput {
            up: true,
            right: true,
            ..Default::default()
        };
        let dir = input.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y < 0.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let input = PaddleInput {
            up: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(input.direction(), Vec2::ZERO);
        assert!(input.is_idle());
    }

    #[test]
    fn test_paddle_moves_scaled_by_elapsed() {
        let rink = rink();
        let mut paddle = Paddle::new(Side::Home, &rink, PADDLE_MASS, PADDLE_SPEED);
        let start = paddle.pos;
        let input = PaddleInput {
            left: true,
            ..Default::default()
        };
        move_paddle(&mut paddle, &input, 32.0, &rink);
        assert!((start.x - paddle.pos.x - 20.0).abs() < 1e-4);
        assert_eq!(paddle.prev_pos, start);
    }

    #[test]
    fn test_paddle_cannot_cross_center_line() {
        let rink = rink();
        let mut paddle = Paddle::new(Side::Home, &rink, PADDLE_MASS, PADDLE_SPEED);
        let input = PaddleInput {
            up: true,
            ..Default::default()
        };
        for _ in 0..200 {
            move_paddle(&mut paddle, &input, 16.0, &rink);
        }
        assert_eq!(paddle.pos.y, rink.center_line() + paddle.radius);
    }

    #[test]
    fn test_paddle_stays_out_of_wall_band() {
        let rink = rink();
        let mut paddle = Paddle::new(Side::Away, &rink, PADDLE_MASS, PADDLE_SPEED);
        let input = PaddleInput {
            up: true,
            left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            move_paddle(&mut paddle, &input, 16.0, &rink);
        }
        let wall = rink.wall_thickness() + PADDLE_WALL_BUFFER;
        assert!(paddle.pos.x >= wall + paddle.radius - 1e-4);
        assert!(paddle.pos.y >= wall + paddle.radius - 1e-4);
    }

    #[test]
    fn test_friction_is_frame_rate_independent() {
        let rink = rink();
        let mut one = Puck::new(&rink, PUCK_MASS);
        one.vel = Vec2::new(10.0, 0.0);
        let mut two = one.clone();

        integrate_puck(&mut one, 32.0, FRICTION);
        integrate_puck(&mut two, 16.0, FRICTION);
        integrate_puck(&mut two, 16.0, FRICTION);

        assert!((one.vel.x - two.vel.x).abs() < 1e-4);
    }

    #[test]
    fn test_slow_components_snap_to_zero() {
        let rink = rink();
        let mut puck = Puck::new(&rink, PUCK_MASS);
        puck.vel = Vec2::new(0.04, 3.0);
        integrate_puck(&mut puck, 16.0, FRICTION);
        assert_eq!(puck.vel.x, 0.0);
        assert!(puck.vel.y > 0.0);
    }

    #[test]
    fn test_limit_speed_keeps_direction() {
        let rink = rink();
        let mut puck = Puck::new(&rink, PUCK_MASS);
        puck.vel = Vec2::new(30.0, 40.0);
        limit_speed(&mut puck, 25.0);
        assert!((puck.speed() - 25.0).abs() < 1e-4);
        assert!((puck.vel.x / puck.vel.y - 0.75).abs() < 1e-5);
    }
}
