//! AI opponent for the Away paddle
//!
//! The controller watches the puck, throttles its targeting decisions to the
//! profile's reaction time, and steers the paddle toward the current target
//! every frame with a smoothed, speed-limited velocity. A stopped puck on its
//! half triggers the forceful-hit sequence in [`hit`].

pub mod hit;
pub mod profile;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use self::hit::{HitPhase, StrikeResult};
use self::profile::AiProfile;
use super::body::{Paddle, Puck, Side};
use super::geometry::fold_into_range;
use super::rink::Rink;
use crate::frame_scale;

/// Side the AI defends
pub const AI_SIDE: Side = Side::Away;

/// Weight kept from the previous puck estimate each frame
pub const PUCK_ESTIMATE_RETAIN: f32 = 0.7;
/// Weight kept from the previous paddle velocity each frame
pub const PADDLE_VELOCITY_RETAIN: f32 = 0.8;
/// Slow puck near centre this long triggers the centre-idle response
pub const CENTER_IDLE_TRIGGER_MS: f32 = 2000.0;
/// "Near centre" radius as a fraction of rink width
pub const CENTER_ZONE_FRACTION: f32 = 0.25;
/// Puck above this fraction of the height is in the AI's danger zone
pub const DANGER_ZONE_FRACTION: f32 = 0.3;
/// Extra attack probability in the danger zone
pub const DANGER_ATTACK_BONUS: f32 = 0.3;
/// Extra attack probability for a slow approaching puck
pub const SLOW_PUCK_ATTACK_BONUS: f32 = 0.2;
/// Floor on the vertical speed estimate used for time-to-reach
pub const MIN_PREDICTION_SPEED: f32 = 0.1;
/// Slow-down radius around the target, as a fraction of paddle radius
pub const SLOW_DOWN_FRACTION: f32 = 0.5;

/// Observable behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AiMode {
    #[default]
    Tracking,
    CenterIdleResponse,
    HitPreparing,
    HitExecuting,
}

/// Per-match AI session: smoothing buffers, timers and the hit state machine
#[derive(Debug, Clone)]
pub struct AiController {
    profile: AiProfile,
    last_puck_pos: Option<Vec2>,
    /// Smoothed puck displacement per reference tick
    puck_dir: Vec2,
    /// Smoothed puck speed per reference tick
    puck_speed: f32,
    decision_timer_ms: f32,
    target: Vec2,
    velocity: Vec2,
    center_idle_ms: f32,
    stopped_ms: f32,
    /// Steer around the puck instead of through it (danger-zone guarding)
    keep_clear: bool,
    hit: HitPhase,
}

impl AiController {
    pub fn new(profile: AiProfile, rink: &Rink) -> Self {
        Self {
            profile,
            last_puck_pos: None,
            puck_dir: Vec2::ZERO,
            puck_speed: 0.0,
            decision_timer_ms: 0.0,
            target: rink.paddle_start(AI_SIDE),
            velocity: Vec2::ZERO,
            center_idle_ms: 0.0,
            stopped_ms: 0.0,
            keep_clear: false,
            hit: HitPhase::Idle,
        }
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    /// Swap in a new opponent; all session state starts over
    pub fn set_profile(&mut self, profile: AiProfile, rink: &Rink) {
        *self = Self::new(profile, rink);
    }

    /// Forget everything observed so far (new point or new match)
    pub fn reset(&mut self, rink: &Rink) {
        let profile = self.profile.clone();
        *self = Self::new(profile, rink);
    }

    /// Follow a rink resize. Positional state scales with the rink; estimates stay in per-tick units.
    pub fn rescale(&mut self, factor: Vec2, rink: &Rink) {
        self.last_puck_pos = self.last_puck_pos.map(|p| p * factor);
        self.target = rink.clamp_to_half(AI_SIDE, rink.paddle_radius(), self.target * factor);
        self.hit = match self.hit {
            HitPhase::Preparing {
                prep_point,
                shot_target,
                elapsed_ms,
            } => HitPhase::Preparing {
                prep_point: rink.clamp_to_half(AI_SIDE, rink.paddle_radius(), prep_point * factor),
                shot_target: shot_target * factor,
                elapsed_ms,
            },
            // a charge in flight is dropped
            HitPhase::Executing { .. } => HitPhase::Idle,
            HitPhase::Idle => HitPhase::Idle,
        };
    }

    pub fn mode(&self) -> AiMode {
        match self.hit {
            HitPhase::Preparing { .. } => AiMode::HitPreparing,
            HitPhase::Executing { .. } => AiMode::HitExecuting,
            HitPhase::Idle if self.center_idle_active() => AiMode::CenterIdleResponse,
            HitPhase::Idle => AiMode::Tracking,
        }
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn hit_phase(&self) -> HitPhase {
        self.hit
    }

    /// Smoothed puck speed estimate, units per reference tick
    pub fn puck_speed_estimate(&self) -> f32 {
        self.puck_speed
    }

    pub fn stopped_ms(&self) -> f32 {
        self.stopped_ms
    }

    /// Run one frame: observe the puck, advance the state machine, move the paddle.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        puck: &Puck,
        paddle: &mut Paddle,
        rink: &Rink,
        elapsed_ms: f32,
        rng: &mut R,
    ) -> AiMode {
        paddle.snapshot();

        self.observe(puck, elapsed_ms);
        self.update_idle_timers(puck, rink, elapsed_ms);
        self.advance_hit(puck, paddle, rink, elapsed_ms, rng);

        self.decision_timer_ms += elapsed_ms;
        if self.decision_timer_ms >= self.profile.reaction_time {
            self.decision_timer_ms = 0.0;
            if self.hit == HitPhase::Idle {
                self.decide(puck, paddle, rink, rng);
            }
        }

        match self.hit {
            HitPhase::Executing {
                velocity,
                start,
                max_travel,
                ..
            } => {
                let result = hit::strike_step(paddle, puck, rink, velocity, start, max_travel, frame_scale(elapsed_ms));
                match result {
                    StrikeResult::Continuing => {}
                    StrikeResult::Contact => {
                        log::debug!("AI hit connected at {:?}", paddle.pos);
                        self.finish_hit();
                    }
                    StrikeResult::Aborted => {
                        log::debug!("AI hit aborted: travelled too far");
                        self.finish_hit();
                    }
                }
            }
            HitPhase::Preparing { .. } => self.steer_clear(puck, paddle, rink, elapsed_ms),
            HitPhase::Idle if self.keep_clear => self.steer_clear(puck, paddle, rink, elapsed_ms),
            HitPhase::Idle => self.move_toward_target(paddle, rink, elapsed_ms),
        }

        self.mode()
    }

    fn observe(&mut self, puck: &Puck, elapsed_ms: f32) {
        let ticks = frame_scale(elapsed_ms);
        if let Some(last) = self.last_puck_pos.filter(|_| ticks > 0.0) {
            let step = (puck.pos - last) / ticks;
            let fresh = 1.0 - PUCK_ESTIMATE_RETAIN;
            self.puck_dir = self.puck_dir * PUCK_ESTIMATE_RETAIN + step * fresh;
            self.puck_speed = self.puck_speed * PUCK_ESTIMATE_RETAIN + step.length() * fresh;
        }
        self.last_puck_pos = Some(puck.pos);
    }

    fn update_idle_timers(&mut self, puck: &Puck, rink: &Rink, elapsed_ms: f32) {
        let scale = rink.scale();

        if self.puck_speed < self.profile.stopped_puck_threshold * scale {
            self.stopped_ms += elapsed_ms;
        } else {
            self.stopped_ms = 0.0;
        }

        let near_center = puck.pos.distance(rink.center()) < rink.width * CENTER_ZONE_FRACTION;
        if near_center && self.puck_speed < self.profile.center_activity_threshold * scale {
            let was_active = self.center_idle_active();
            self.center_idle_ms += elapsed_ms;
            if !was_active && self.center_idle_active() {
                log::debug!("AI centre-idle response after {:.0}ms", self.center_idle_ms);
            }
        } else {
            self.center_idle_ms = 0.0;
        }
    }

    fn center_idle_active(&self) -> bool {
        self.center_idle_ms >= CENTER_IDLE_TRIGGER_MS
    }

    fn puck_stopped(&self, rink: &Rink) -> bool {
        self.puck_speed < self.profile.stopped_puck_threshold * rink.scale()
    }

    /// Whether the AI paddle can touch the puck without leaving its half
    fn puck_in_reach(&self, puck: &Puck, paddle: &Paddle, rink: &Rink) -> bool {
        let (_, max) = rink.paddle_bounds(AI_SIDE, paddle.radius);
        puck.pos.y <= max.y + paddle.radius + puck.radius
    }

    /// Furthest line the paddle steps forward to when attacking: `offensive_reach`
    /// of the way from its end-wall limit to the centre line
    fn reach_line(&self, rink: &Rink, paddle: &Paddle) -> f32 {
        let (min, max) = rink.paddle_bounds(AI_SIDE, paddle.radius);
        min.y + (max.y - min.y) * self.profile.offensive_reach.clamp(0.0, 1.0)
    }

    fn advance_hit<R: Rng + ?Sized>(
        &mut self,
        puck: &Puck,
        paddle: &Paddle,
        rink: &Rink,
        elapsed_ms: f32,
        rng: &mut R,
    ) {
        // A moving puck cancels any charge in progress
        if self.hit != HitPhase::Idle && !self.puck_stopped(rink) {
            log::debug!("AI hit cancelled: puck moving again");
            self.hit = HitPhase::Idle;
            return;
        }

        match self.hit {
            HitPhase::Idle => {
                let ready = self.stopped_ms >= self.profile.stopped_puck_reaction_time
                    && self.puck_in_reach(puck, paddle, rink);
                // A puck the paddle cannot get behind is left to the guard logic in `decide`
                let plan = if ready {
                    hit::plan(puck, paddle, rink, &self.profile, rng)
                } else {
                    None
                };
                if let Some((prep_point, shot_target)) = plan {
                    log::debug!("AI preparing hit from {prep_point:?} toward {shot_target:?}");
                    self.target = prep_point;
                    self.hit = HitPhase::Preparing {
                        prep_point,
                        shot_target,
                        elapsed_ms: 0.0,
                    };
                }
            }
            HitPhase::Preparing {
                prep_point,
                shot_target,
                elapsed_ms: waited,
            } => {
                let waited = waited + elapsed_ms;
                if hit::arrived(paddle, prep_point) {
                    let velocity = hit::strike_velocity(paddle, puck, shot_target, rink, &self.profile);
                    log::debug!("AI executing hit, velocity {velocity:?}");
                    self.hit = HitPhase::Executing {
                        velocity,
                        start: paddle.pos,
                        max_travel: hit::max_strike_travel(paddle, puck, rink, &self.profile),
                        elapsed_ms: 0.0,
                    };
                } else if waited > hit::PREP_TIMEOUT_MS {
                    log::debug!("AI hit aborted: could not line up");
                    self.finish_hit();
                } else {
                    self.hit = HitPhase::Preparing {
                        prep_point,
                        shot_target,
                        elapsed_ms: waited,
                    };
                }
            }
            HitPhase::Executing {
                velocity,
                start,
                max_travel,
                elapsed_ms: charged,
            } => {
                let charged = charged + elapsed_ms;
                if charged > hit::STRIKE_TIMEOUT_MS {
                    log::debug!("AI hit aborted: timed out");
                    self.finish_hit();
                } else {
                    self.hit = HitPhase::Executing {
                        velocity,
                        start,
                        max_travel,
                        elapsed_ms: charged,
                    };
                }
            }
        }
    }

    fn finish_hit(&mut self) {
        self.hit = HitPhase::Idle;
        self.stopped_ms = 0.0;
        self.center_idle_ms = 0.0;
        self.decision_timer_ms = 0.0;
        self.velocity = Vec2::ZERO;
    }

    /// Throttled targeting decision
    fn decide<R: Rng + ?Sized>(&mut self, puck: &Puck, paddle: &Paddle, rink: &Rink, rng: &mut R) {
        let (min, max) = rink.paddle_bounds(AI_SIDE, paddle.radius);
        let half = rink.center_line();
        let home_y = (rink.height * self.profile.defensive_position).clamp(min.y, max.y);
        self.keep_clear = false;

        let target = if self.center_idle_active() {
            puck.pos
        } else if self.puck_dir.y < 0.0 || puck.pos.y < half {
            let vertical = self.puck_dir.y.abs().max(MIN_PREDICTION_SPEED);
            let ticks = (puck.pos.y - home_y).abs() / vertical;
            let judged = ticks * (1.0 - rng.random::<f32>() * (1.0 - self.profile.accuracy));
            let predicted_x = self.predict_x(puck, rink, judged);

            let approaching = puck.pos.y < half && self.puck_dir.y < 0.0;
            let danger = puck.pos.y < rink.height * DANGER_ZONE_FRACTION;

            let mut attack_chance = self.profile.aggressiveness;
            if danger {
                attack_chance += DANGER_ATTACK_BONUS;
            }
            if self.puck_speed < self.profile.slow_puck_threshold * rink.scale() {
                attack_chance += SLOW_PUCK_ATTACK_BONUS;
            }

            if approaching && rng.random::<f32>() < attack_chance {
                // Step into the puck's path, no further forward than the profile's reach
                Vec2::new(predicted_x, puck.pos.y.min(self.reach_line(rink, paddle)))
            } else if danger {
                // Collapse toward the puck from the goal side, never pushing it in
                self.keep_clear = true;
                let y = if puck.pos.y > home_y {
                    (home_y + puck.pos.y) * 0.5
                } else {
                    min.y + rink.height * self.profile.goal_defense_offset
                };
                self.guard_point(puck, paddle, Vec2::new(predicted_x, y), min.y)
            } else {
                Vec2::new(predicted_x, home_y)
            }
        } else {
            let noise = (rng.random::<f32>() * 2.0 - 1.0) * rink.width * self.profile.position_noise;
            Vec2::new(rink.width / 2.0 + noise, home_y)
        };

        self.target = rink.clamp_to_half(AI_SIDE, paddle.radius, target);
    }

    /// Keep a danger-zone guard spot goal-side of the puck by a clear margin. With
    /// no room between puck and end wall, hold off on the field side instead.
    fn guard_point(&self, puck: &Puck, paddle: &Paddle, wanted: Vec2, min_y: f32) -> Vec2 {
        let clearance = (paddle.radius + puck.radius) * hit::MIN_PREP_CLEARANCE;
        let goal_side = puck.pos.y - clearance;
        if goal_side >= min_y {
            Vec2::new(wanted.x, wanted.y.min(goal_side))
        } else {
            Vec2::new(wanted.x, puck.pos.y + clearance)
        }
    }

    /// Predicted puck x after `ticks`, with side-wall bounces folded in
    fn predict_x(&self, puck: &Puck, rink: &Rink, ticks: f32) -> f32 {
        let raw = puck.pos.x + self.puck_dir.x * ticks;
        let lo = rink.wall_thickness() + puck.radius;
        let hi = rink.width - lo;
        fold_into_range(raw, lo, hi)
    }

    /// Pursue the target by way of a detour that never drives through the puck
    fn steer_clear(&mut self, puck: &Puck, paddle: &mut Paddle, rink: &Rink, elapsed_ms: f32) {
        let waypoint = hit::approach_point(paddle, puck, self.target, rink);
        let waypoint = rink.clamp_to_half(AI_SIDE, paddle.radius, waypoint);
        self.steer(paddle, rink, elapsed_ms, waypoint);
    }

    /// Smoothed, speed-limited pursuit of the current target
    pub fn move_toward_target(&mut self, paddle: &mut Paddle, rink: &Rink, elapsed_ms: f32) {
        self.steer(paddle, rink, elapsed_ms, self.target);
    }

    fn steer(&mut self, paddle: &mut Paddle, rink: &Rink, elapsed_ms: f32, aim: Vec2) {
        let delta = aim - paddle.pos;
        let distance = delta.length();
        let slow_radius = paddle.radius * SLOW_DOWN_FRACTION;
        let ease = if distance < slow_radius {
            distance / slow_radius
        } else {
            1.0
        };

        let desired = delta * self.profile.smoothing * ease;
        self.velocity = self.velocity * PADDLE_VELOCITY_RETAIN + desired * (1.0 - PADDLE_VELOCITY_RETAIN);
        self.velocity = self
            .velocity
            .clamp_length_max(paddle.scaled_speed(rink) * self.profile.max_speed);

        paddle.pos += self.velocity * frame_scale(elapsed_ms);
        paddle.confine(rink);
    }
}
