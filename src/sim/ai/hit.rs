//! Forceful-hit sequence for a puck that has come to rest on the AI's half
//!
//! Idle -> Preparing (line up behind the puck) -> Executing (charge through it).

use glam::Vec2;
use rand::Rng;

use super::profile::AiProfile;
use crate::sim::body::{Paddle, Puck, Side};
use crate::sim::geometry::distance_to_segment;
use crate::sim::rink::Rink;

/// Strike speed as a multiple of the AI's top pursuit speed
pub const HIT_SPEED_MULTIPLIER: f32 = 2.5;
/// Arrival tolerance at the preparation point, as a fraction of paddle radius
pub const PREP_ARRIVAL_FRACTION: f32 = 0.5;
/// Give up lining up after this long
pub const PREP_TIMEOUT_MS: f32 = 1500.0;
/// Give up a strike that has not connected after this long
pub const STRIKE_TIMEOUT_MS: f32 = 500.0;
/// How deep into contact range a strike step may end, as a fraction of the radius sum
const STRIKE_CONTACT_DEPTH: f32 = 0.25;
/// A prep point must sit at least this far behind the puck along the shot, as a multiple of the radius sum
pub const MIN_PREP_CLEARANCE: f32 = 1.2;
/// A straight path passing closer than this to the puck needs a detour (multiple of the radius sum)
const PATH_CLEARANCE: f32 = 1.1;
/// Lateral offset that counts as already beside the puck
const SIDESTEP_THRESHOLD: f32 = 1.4;
/// Lateral offset the detour steps out to
const SIDESTEP_OFFSET: f32 = 1.6;

/// Where the hit sequence stands
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum HitPhase {
    #[default]
    Idle,
    /// Moving to `prep_point`, behind the puck relative to `shot_target`
    Preparing {
        prep_point: Vec2,
        shot_target: Vec2,
        elapsed_ms: f32,
    },
    /// Charging at a fixed velocity (units per reference tick)
    Executing {
        velocity: Vec2,
        start: Vec2,
        max_travel: f32,
        elapsed_ms: f32,
    },
}

/// How a strike step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeResult {
    Continuing,
    /// Paddle reached contact range; the collision resolver takes over
    Contact,
    /// Travelled too far or too long without contact
    Aborted,
}

/// Shot target in the opposing goal mouth, jittered by the profile's accuracy
pub fn shot_target<R: Rng + ?Sized>(rink: &Rink, profile: &AiProfile, rng: &mut R) -> Vec2 {
    let spread = rink.goal_width() * 0.5 * (1.0 - profile.accuracy).clamp(0.0, 1.0);
    let x = rink.width / 2.0 + (rng.random::<f32>() * 2.0 - 1.0) * spread;
    Vec2::new(x, rink.height)
}

/// Unit direction from the puck toward the shot target
pub fn shot_direction(puck: &Puck, shot_target: Vec2) -> Vec2 {
    (shot_target - puck.pos).normalize_or(Vec2::Y)
}

/// Point behind the puck, opposite the shot, clamped to the AI's half.
///
/// `None` when clamping leaves the point level with or in front of the puck,
/// e.g. a puck resting against the AI's own end wall.
pub fn prep_point(puck: &Puck, shot_target: Vec2, paddle: &Paddle, rink: &Rink, profile: &AiProfile) -> Option<Vec2> {
    let dir = shot_direction(puck, shot_target);
    let back = dir * profile.hit_prep_distance * rink.scale();
    let prep = rink.clamp_to_half(Side::Away, paddle.radius, puck.pos - back);
    let behind = (puck.pos - prep).dot(dir);
    (behind >= (paddle.radius + puck.radius) * MIN_PREP_CLEARANCE).then_some(prep)
}

/// Pick a shot and its prep point: straight at the goal first, then banked off
/// either side wall. `None` when the paddle cannot get behind the puck for any of them.
pub fn plan<R: Rng + ?Sized>(
    puck: &Puck,
    paddle: &Paddle,
    rink: &Rink,
    profile: &AiProfile,
    rng: &mut R,
) -> Option<(Vec2, Vec2)> {
    let aim = shot_target(rink, profile, rng);
    let lo = rink.wall_thickness() + puck.radius;
    let hi = rink.width - lo;
    let banks = [Vec2::new(2.0 * lo - aim.x, aim.y), Vec2::new(2.0 * hi - aim.x, aim.y)];

    std::iter::once(aim)
        .chain(banks)
        .find_map(|target| prep_point(puck, target, paddle, rink, profile).map(|prep| (prep, target)))
}

/// Next point to steer for on the way to `dest` without touching the puck.
///
/// A clear straight path returns `dest`. Otherwise the paddle first steps out
/// beside the puck, then drops back alongside it until level with `dest`.
pub fn approach_point(paddle: &Paddle, puck: &Puck, dest: Vec2, rink: &Rink) -> Vec2 {
    let reach = paddle.radius + puck.radius;
    if distance_to_segment(puck.pos, paddle.pos, dest) >= reach * PATH_CLEARANCE {
        return dest;
    }

    let push = (puck.pos - dest).normalize_or(Vec2::Y);
    let across = push.perp();
    let rel = paddle.pos - puck.pos;
    let lateral = rel.dot(across);

    if lateral.abs() < reach * SIDESTEP_THRESHOLD {
        let preferred = if lateral < 0.0 { -across } else { across };
        let level = puck.pos + push * rel.dot(push);
        let (min, max) = rink.paddle_bounds(paddle.side, paddle.radius);
        let step_out = |side: Vec2| level + side * reach * SIDESTEP_OFFSET;
        // prefer the side the paddle is already on, unless the wall is in the way
        [preferred, -preferred]
            .into_iter()
            .map(step_out)
            .find(|p| p.cmpge(min).all() && p.cmple(max).all())
            .unwrap_or_else(|| step_out(preferred))
    } else {
        puck.pos + across * lateral + push * (dest - puck.pos).dot(push)
    }
}

/// Whether the paddle is close enough to the prep point to strike
#[inline]
pub fn arrived(paddle: &Paddle, prep_point: Vec2) -> bool {
    paddle.pos.distance(prep_point) <= paddle.radius * PREP_ARRIVAL_FRACTION
}

/// Strike velocity aimed from the paddle through the puck
pub fn strike_velocity(paddle: &Paddle, puck: &Puck, shot_target: Vec2, rink: &Rink, profile: &AiProfile) -> Vec2 {
    let dir = (puck.pos - paddle.pos).normalize_or(shot_direction(puck, shot_target));
    let speed = paddle.scaled_speed(rink) * profile.max_speed * HIT_SPEED_MULTIPLIER * profile.hit_force;
    dir * speed
}

/// Furthest a strike may travel before it is abandoned
pub fn max_strike_travel(paddle: &Paddle, puck: &Puck, rink: &Rink, profile: &AiProfile) -> f32 {
    (profile.hit_prep_distance * rink.scale() + paddle.radius + puck.radius) * 1.5
}

/// Advance a strike by one frame. The step is shortened so a fast paddle cannot
/// jump clean over the puck between frames.
pub fn strike_step(
    paddle: &mut Paddle,
    puck: &Puck,
    rink: &Rink,
    velocity: Vec2,
    start: Vec2,
    max_travel: f32,
    ticks: f32,
) -> StrikeResult {
    let reach = paddle.radius + puck.radius;
    let step = velocity * ticks;
    let step_len = step.length();

    let gap = paddle.pos.distance(puck.pos) - reach;
    let allowed = (gap + reach * STRIKE_CONTACT_DEPTH).max(0.0);
    let step = if step_len > allowed && step_len > 0.0 {
        step * (allowed / step_len)
    } else {
        step
    };

    paddle.pos += step;
    paddle.confine(rink);

    if paddle.pos.distance(puck.pos) <= reach {
        StrikeResult::Contact
    } else if paddle.pos.distance(start) > max_travel {
        StrikeResult::Aborted
    } else {
        StrikeResult::Continuing
    }
}
