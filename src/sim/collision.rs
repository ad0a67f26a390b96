//! Puck/paddle collision detection and response
//!
//! Impulse-based response between two circles of unequal mass, followed by the
//! arcade touches that make hits feel lively: paddle carry-through, push-out,
//! a minimum speed and a little randomness. The steps run in a fixed order
//! because each one works on the velocity the previous step produced.

use glam::Vec2;
use rand::Rng;

use super::body::{Paddle, Puck};
use super::geometry::{circles_overlap, contact_normal, overlap_depth};
use super::rink::Rink;
use crate::consts::{DIVISOR_EPSILON, SEPARATION_SLOP};
use crate::settings::PhysicsTuning;

/// What happened when a puck and a paddle were tested against each other
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    /// Not touching
    Miss,
    /// Centres coincide, so there is no contact normal; treated as no collision
    Degenerate,
    /// Touching but not approaching; velocity left alone
    Separating,
    /// Impulse applied
    Hit {
        /// Unit normal from paddle centre toward puck centre
        normal: Vec2,
        /// Impulse magnitude along the normal
        impulse: f32,
    },
}

impl CollisionOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, CollisionOutcome::Hit { .. })
    }
}

/// Whether puck and paddle interpenetrate
#[inline]
pub fn check_collision(puck: &Puck, paddle: &Paddle) -> bool {
    circles_overlap(puck.pos, puck.radius, paddle.pos, paddle.radius)
}

/// Paddle velocity as seen by the puck this frame
#[inline]
pub fn effective_paddle_velocity(paddle: &Paddle, momentum_transfer: f32) -> Vec2 {
    paddle.displacement() * momentum_transfer
}

/// Resolve a puck/paddle contact in place.
///
/// The paddle is not moved: its mass is large enough that the puck barely
/// perturbs it, and paddles are driven by input anyway.
pub fn resolve_paddle_collision<R: Rng + ?Sized>(
    puck: &mut Puck,
    paddle: &Paddle,
    rink: &Rink,
    tuning: &PhysicsTuning,
    rng: &mut R,
) -> CollisionOutcome {
    if !check_collision(puck, paddle) {
        return CollisionOutcome::Miss;
    }

    // 1. Contact normal
    let Some((normal, distance)) = contact_normal(paddle.pos, puck.pos) else {
        return CollisionOutcome::Degenerate;
    };

    // 2-3. Relative velocity along the normal; only approaching bodies collide
    let paddle_vel = effective_paddle_velocity(paddle, tuning.momentum_transfer);
    let approach = (puck.vel - paddle_vel).dot(normal);
    if approach >= 0.0 {
        return CollisionOutcome::Separating;
    }

    // 4. Impulse with restitution
    let inverse_masses = 1.0 / puck.mass + 1.0 / paddle.mass;
    let impulse = -(1.0 + tuning.paddle_elasticity) * approach / inverse_masses;
    puck.vel += normal * (impulse / puck.mass);

    // 5. Carry-through from the paddle's own motion
    puck.vel += paddle_vel * tuning.paddle_push;

    // 6. Push the puck clear using the pre-impulse distance
    let overlap = overlap_depth(distance, puck.radius, paddle.radius);
    if overlap > 0.0 {
        puck.pos += normal * overlap * SEPARATION_SLOP;
    }

    // 7. Speed floor
    let floor = tuning.min_collision_speed * rink.scale();
    enforce_min_speed(puck, floor, normal);

    // 8. Jitter, then hold the floor again so the perturbation cannot undercut it
    let jitter = tuning.angle_randomization * puck.speed();
    puck.vel.x += (rng.random::<f32>() - 0.5) * jitter;
    puck.vel.y += (rng.random::<f32>() - 0.5) * jitter;
    enforce_min_speed(puck, floor, normal);

    CollisionOutcome::Hit { normal, impulse }
}

fn enforce_min_speed(puck: &mut Puck, floor: f32, fallback_dir: Vec2) {
    let speed = puck.speed();
    if speed >= floor {
        return;
    }
    if speed > DIVISOR_EPSILON {
        puck.vel *= floor / speed;
    } else {
        puck.vel = fallback_dir * floor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::body::Side;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Rink, Puck, Paddle, PhysicsTuning, Pcg32) {
        let rink = Rink::new(500.0, 900.0);
        let puck = Puck::new(&rink, PUCK_MASS);
        let paddle = Paddle::new(Side::Home, &rink, PADDLE_MASS, PADDLE_SPEED);
        (rink, puck, paddle, PhysicsTuning::default(), Pcg32::seed_from_u64(7))
    }

    #[test]
    fn test_miss_when_apart() {
        let (rink, mut puck, paddle, tuning, mut rng) = setup();
        puck.vel = Vec2::new(0.0, 5.0);
        let before = puck.clone();
        let outcome = resolve_paddle_collision(&mut puck, &paddle, &rink, &tuning, &mut rng);
        assert_eq!(outcome, CollisionOutcome::Miss);
        assert_eq!(puck.vel, before.vel);
    }

    #[test]
    fn test_puck_moving_into_paddle_bounces_back() {
        let (rink, mut puck, paddle, tuning, mut rng) = setup();
        puck.pos = paddle.pos - Vec2::new(0.0, 35.0);
        puck.vel = Vec2::new(0.0, 6.0);

        let outcome = resolve_paddle_collision(&mut puck, &paddle, &rink, &tuning, &mut rng);

        assert!(outcome.is_hit());
        assert!(puck.vel.y < 0.0, "puck should rebound upward, got {:?}", puck.vel);
        // pushed clear of the paddle
        assert!(puck.pos.distance(paddle.pos) >= puck.radius + paddle.radius);
    }

    #[test]
    fn test_separating_contact_leaves_velocity_untouched() {
        let (rink, mut puck, paddle, tuning, mut rng) = setup();
        puck.pos = paddle.pos - Vec2::new(0.0, 35.0);
        puck.vel = Vec2::new(1.0, -6.0);
        let before = puck.clone();

        let outcome = resolve_paddle_collision(&mut puck, &paddle, &rink, &tuning, &mut rng);

        assert_eq!(outcome, CollisionOutcome::Separating);
        assert_eq!(puck.vel, before.vel);
        assert_eq!(puck.pos, before.pos);
    }

    #[test]
    fn test_coincident_centres_are_not_a_collision() {
        let (rink, mut puck, paddle, tuning, mut rng) = setup();
        puck.pos = paddle.pos;
        puck.vel = Vec2::new(3.0, 3.0);
        let outcome = resolve_paddle_collision(&mut puck, &paddle, &rink, &tuning, &mut rng);
        assert_eq!(outcome, CollisionOutcome::Degenerate);
        assert_eq!(puck.vel, Vec2::new(3.0, 3.0));
        assert!(puck.vel.is_finite());
    }

    #[test]
    fn test_moving_paddle_strikes_resting_puck() {
        let (rink, mut puck, mut paddle, tuning, mut rng) = setup();
        puck.pos = paddle.pos - Vec2::new(0.0, 38.0);
        paddle.prev_pos = paddle.pos + Vec2::new(0.0, 10.0);

        let outcome = resolve_paddle_collision(&mut puck, &paddle, &rink, &tuning, &mut rng);

        assert!(outcome.is_hit());
        assert!(puck.vel.y < -4.0);
        assert!(puck.speed() >= tuning.min_collision_speed * rink.scale());
    }

    #[test]
    fn test_speed_floor_after_gentle_touch() {
        let (rink, mut puck, paddle, tuning, mut rng) = setup();
        puck.pos = paddle.pos - Vec2::new(5.0, 38.0);
        puck.vel = Vec2::new(0.0, 0.2);

        let outcome = resolve_paddle_collision(&mut puck, &paddle, &rink, &tuning, &mut rng);

        assert!(outcome.is_hit());
        assert!(puck.speed() >= tuning.min_collision_speed - 1e-4);
    }

    #[test]
    fn test_impulse_magnitude_matches_formula() {
        let (rink, mut puck, paddle, tuning, mut rng) = setup();
        puck.pos = paddle.pos - Vec2::new(0.0, 35.0);
        puck.vel = Vec2::new(0.0, 10.0);

        let outcome = resolve_paddle_collision(&mut puck, &paddle, &rink, &tuning, &mut rng);

        let expected = (1.0 + PADDLE_ELASTICITY) * 10.0 / (1.0 / PUCK_MASS + 1.0 / PADDLE_MASS);
        match outcome {
            CollisionOutcome::Hit { normal, impulse } => {
                assert!((impulse - expected).abs() < 1e-3);
                assert!((normal - Vec2::new(0.0, -1.0)).length() < 1e-5);
            }
            other => panic!("expected hit, got {other:?}"),
        }
    }
}
