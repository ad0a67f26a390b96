//! Air Hockey - simulation core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (motion, collisions, boundaries, AI)
//! - `session`: Match bookkeeping layered on top of the simulation (scores, win rules)
//! - `settings`: Tunable physics and match rules
//! - `progress`: Per-opponent star ratings
//! - `error`: Persistence errors

pub mod error;
pub mod progress;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::StoreError;
pub use progress::Progress;
pub use session::{GameMode, MatchOutcome, Scoreboard, Session, SessionEvent};
pub use settings::{PhysicsTuning, Settings};

/// Game configuration constants
pub mod consts {
    /// Reference frame duration. All per-frame rates are expressed per reference tick.
    pub const REFERENCE_TICK_MS: f32 = 16.0;
    /// Largest elapsed time a single frame may integrate
    pub const MAX_FRAME_MS: f32 = 50.0;
    /// Rink width the base speeds were tuned for
    pub const REFERENCE_WIDTH: f32 = 500.0;

    /// Rink shape (width / height)
    pub const RINK_ASPECT: f32 = 1.0 / 1.8;
    /// Padding kept around the rink when fitting it to a viewport
    pub const VIEWPORT_PADDING: f32 = 10.0;

    /// Geometry as fractions of rink width (or height where noted)
    pub const WALL_THICKNESS_FRACTION: f32 = 0.04;
    pub const GOAL_WIDTH_FRACTION: f32 = 0.4;
    /// Fraction of rink height
    pub const GOAL_DEPTH_FRACTION: f32 = 0.033;
    pub const PUCK_RADIUS_FRACTION: f32 = 0.03;
    pub const PADDLE_RADIUS_FRACTION: f32 = 0.05;
    /// Paddle start distance from its own goal line (fraction of height)
    pub const PADDLE_START_FRACTION: f32 = 0.11;
    /// Extra gap between a paddle and the wall face
    pub const PADDLE_WALL_BUFFER: f32 = 2.0;

    /// Body masses
    pub const PUCK_MASS: f32 = 1.0;
    pub const PADDLE_MASS: f32 = 5.0;
    /// Paddle base speed (units per reference tick at reference width)
    pub const PADDLE_SPEED: f32 = 10.0;

    /// Puck friction per reference tick
    pub const FRICTION: f32 = 0.992;
    /// Velocity components below this snap to zero
    pub const VELOCITY_EPSILON: f32 = 0.05;
    /// Puck speed cap (scaled by rink width)
    pub const PUCK_SPEED_LIMIT: f32 = 25.0;
    /// Restitution for paddle hits; above 1 adds energy
    pub const PADDLE_ELASTICITY: f32 = 1.2;
    /// Speed floor after a paddle hit (scaled by rink width)
    pub const MIN_COLLISION_SPEED: f32 = 4.0;
    /// Energy kept on wall bounces
    pub const REBOUND_DAMPING: f32 = 0.85;
    /// Random perturbation applied after a paddle hit (fraction of speed)
    pub const ANGLE_RANDOMIZATION: f32 = 0.05;
    /// Fraction of paddle displacement treated as paddle velocity
    pub const PADDLE_MOMENTUM_TRANSFER: f32 = 0.7;
    /// Fraction of paddle velocity added straight to the puck on contact
    pub const PADDLE_PUSH: f32 = 0.7;
    /// Push-out over-correction when separating overlapping bodies
    pub const SEPARATION_SLOP: f32 = 1.05;

    /// Serve speed band (scaled by rink width)
    pub const LAUNCH_SPEED_MIN: f32 = 4.0;
    pub const LAUNCH_SPEED_MAX: f32 = 6.0;

    /// Goal flash length in frames
    pub const GOAL_FLASH_FRAMES: u32 = 45;
    /// Points to win a classic match
    pub const CLASSIC_WIN_SCORE: u32 = 3;
    /// Points to win a duel
    pub const DUEL_WIN_SCORE: u32 = 10;

    /// Floor for any distance or speed used as a divisor
    pub const DIVISOR_EPSILON: f32 = 1e-4;
}

/// Convert an elapsed time in milliseconds to reference ticks
#[inline]
pub fn frame_scale(elapsed_ms: f32) -> f32 {
    elapsed_ms / consts::REFERENCE_TICK_MS
}

/// Clamp a raw frame delta into the range the integrator accepts
#[inline]
pub fn clamp_elapsed(elapsed_ms: f32) -> f32 {
    if elapsed_ms.is_finite() {
        elapsed_ms.clamp(0.0, consts::MAX_FRAME_MS)
    } else {
        0.0
    }
}
