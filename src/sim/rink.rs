//! Rink geometry
//!
//! Every length in the simulation derives from the rink's width and height.
//! Nothing here is independently settable: resizing the rink recomputes all of it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Side;
use crate::consts::*;

/// The playing surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rink {
    pub width: f32,
    pub height: f32,
}

impl Rink {
    /// Rink of the given size. Non-positive or non-finite sizes fall back to the reference rink.
    pub fn new(width: f32, height: f32) -> Self {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Self { width, height }
        } else {
            Self::default()
        }
    }

    /// Largest rink with the standard aspect ratio that fits the viewport
    pub fn fit_viewport(available_width: f32, available_height: f32) -> Self {
        let max_width = available_width - VIEWPORT_PADDING * 2.0;
        let max_height = available_height - VIEWPORT_PADDING * 2.0;

        if max_width / RINK_ASPECT <= max_height {
            Self::new(max_width, max_width / RINK_ASPECT)
        } else {
            Self::new(max_height * RINK_ASPECT, max_height)
        }
    }

    /// Size multiplier relative to the reference width
    #[inline]
    pub fn scale(&self) -> f32 {
        self.width / REFERENCE_WIDTH
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn center_line(&self) -> f32 {
        self.height / 2.0
    }

    #[inline]
    pub fn wall_thickness(&self) -> f32 {
        self.width * WALL_THICKNESS_FRACTION
    }

    #[inline]
    pub fn goal_width(&self) -> f32 {
        self.width * GOAL_WIDTH_FRACTION
    }

    /// Left edge of both goal mouths
    #[inline]
    pub fn goal_x(&self) -> f32 {
        (self.width - self.goal_width()) / 2.0
    }

    #[inline]
    pub fn goal_depth(&self) -> f32 {
        self.height * GOAL_DEPTH_FRACTION
    }

    /// Whether an x coordinate lies inside the goal mouth (edges included)
    #[inline]
    pub fn in_goal_mouth(&self, x: f32) -> bool {
        let goal_x = self.goal_x();
        x >= goal_x && x <= goal_x + self.goal_width()
    }

    #[inline]
    pub fn puck_radius(&self) -> f32 {
        self.width * PUCK_RADIUS_FRACTION
    }

    #[inline]
    pub fn paddle_radius(&self) -> f32 {
        self.width * PADDLE_RADIUS_FRACTION
    }

    #[inline]
    pub fn puck_speed_limit(&self, limit: f32) -> f32 {
        limit * self.scale()
    }

    /// Starting spot for a paddle, centred on its own side
    pub fn paddle_start(&self, side: Side) -> Vec2 {
        let offset = self.height * PADDLE_START_FRACTION;
        match side {
            Side::Home => Vec2::new(self.width / 2.0, self.height - offset),
            Side::Away => Vec2::new(self.width / 2.0, offset),
        }
    }

    /// Box a paddle centre may occupy: out of the wall band and on its own half
    pub fn paddle_bounds(&self, side: Side, radius: f32) -> (Vec2, Vec2) {
        let wall = self.wall_thickness() + PADDLE_WALL_BUFFER;
        let half = self.center_line();
        let min_x = wall + radius;
        let max_x = (self.width - wall - radius).max(min_x);
        let (min_y, max_y) = match side {
            Side::Home => (half + radius, self.height - wall - radius),
            Side::Away => (wall + radius, half - radius),
        };
        (Vec2::new(min_x, min_y), Vec2::new(max_x, max_y.max(min_y)))
    }

    /// Clamp a point into a paddle's allowed region
    pub fn clamp_to_half(&self, side: Side, radius: f32, point: Vec2) -> Vec2 {
        let (min, max) = self.paddle_bounds(side, radius);
        point.clamp(min, max)
    }
}

impl Default for Rink {
    fn default() -> Self {
        Self {
            width: REFERENCE_WIDTH,
            height: REFERENCE_WIDTH / RINK_ASPECT,
        }
    }
}
