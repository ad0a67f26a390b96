//! Rink boundaries: wall rebounds, goal detection and serving the puck
//!
//! Goal detection only reports who scored. Scores and win conditions live in
//! the session layer.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;

use super::body::{Player, Puck};
use super::rink::Rink;
use crate::settings::PhysicsTuning;

/// Result of testing the puck against the rink edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundaryReport {
    /// Player who scored, if the puck crossed a goal line inside the mouth
    pub goal: Option<Player>,
    /// Puck bounced off a side wall or an end wall
    pub bounced: bool,
}

/// Test the puck against all four edges.
///
/// A goal leaves the puck where it crossed; the caller relaunches it.
pub fn resolve_boundaries(puck: &mut Puck, rink: &Rink, rebound_damping: f32) -> BoundaryReport {
    let mut report = BoundaryReport::default();
    let wall = rink.wall_thickness();

    // Side walls
    if puck.pos.x - puck.radius <= wall {
        puck.pos.x = wall + puck.radius;
        puck.vel.x = puck.vel.x.abs() * rebound_damping;
        report.bounced = true;
    } else if puck.pos.x + puck.radius >= rink.width - wall {
        puck.pos.x = rink.width - wall - puck.radius;
        puck.vel.x = -puck.vel.x.abs() * rebound_damping;
        report.bounced = true;
    }

    // End walls. The top goal belongs to player 2, so crossing it scores for player 1.
    if puck.pos.y - puck.radius <= 0.0 {
        if rink.in_goal_mouth(puck.pos.x) {
            report.goal = Some(Player::One);
        } else {
            puck.pos.y = puck.radius;
            puck.vel.y = puck.vel.y.abs() * rebound_damping;
            report.bounced = true;
        }
    } else if puck.pos.y + puck.radius >= rink.height {
        if rink.in_goal_mouth(puck.pos.x) {
            report.goal = Some(Player::Two);
        } else {
            puck.pos.y = rink.height - puck.radius;
            puck.vel.y = -puck.vel.y.abs() * rebound_damping;
            report.bounced = true;
        }
    }

    report
}

/// Serve direction in radians.
///
/// After a goal the puck heads away from the scorer within ±45°; the first
/// serve of a match picks any direction.
pub fn launch_angle<R: Rng + ?Sized>(last_scorer: Option<Player>, rng: &mut R) -> f32 {
    match last_scorer {
        // Player 1 scored: toward player 2 (up the screen)
        Some(Player::One) => -FRAC_PI_2 + (rng.random::<f32>() - 0.5) * FRAC_PI_2,
        // Player 2 scored: toward player 1
        Some(Player::Two) => FRAC_PI_2 + (rng.random::<f32>() - 0.5) * FRAC_PI_2,
        None => rng.random::<f32>() * TAU,
    }
}

/// Put the puck on the centre spot and serve it
pub fn launch_puck<R: Rng + ?Sized>(
    puck: &mut Puck,
    rink: &Rink,
    tuning: &PhysicsTuning,
    last_scorer: Option<Player>,
    rng: &mut R,
) {
    puck.recenter(rink);

    let angle = launch_angle(last_scorer, rng);
    let band = (tuning.launch_speed_max - tuning.launch_speed_min).max(0.0);
    let speed = (tuning.launch_speed_min + rng.random::<f32>() * band) * rink.scale();

    puck.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn setup() -> (Rink, Puck) {
        let rink = Rink::new(500.0, 900.0);
        let puck = Puck::new(&rink, PUCK_MASS);
        (rink, puck)
    }

    #[test]
    fn test_left_wall_rebound_is_damped() {
        let (rink, mut puck) = setup();
        puck.pos = Vec2::new(30.0, 400.0);
        puck.vel = Vec2::new(-10.0, 1.0);
        let report = resolve_boundaries(&mut puck, &rink, REBOUND_DAMPING);
        assert!(report.bounced);
        assert_eq!(report.goal, None);
        assert_eq!(puck.pos.x, rink.wall_thickness() + puck.radius);
        assert!((puck.vel.x - 8.5).abs() < 1e-5);
        assert_eq!(puck.vel.y, 1.0);
    }

    #[test]
    fn test_right_wall_rebound() {
        let (rink, mut puck) = setup();
        puck.pos = Vec2::new(470.0, 400.0);
        puck.vel = Vec2::new(10.0, 0.0);
        resolve_boundaries(&mut puck, &rink, REBOUND_DAMPING);
        assert!(puck.vel.x < 0.0);
        assert_eq!(puck.pos.x, rink.width - rink.wall_thickness() - puck.radius);
    }

    #[test]
    fn test_top_goal_scores_for_player_one() {
        let (rink, mut puck) = setup();
        puck.pos = Vec2::new(250.0, 5.0);
        puck.vel = Vec2::new(0.0, -5.0);
        let report = resolve_boundaries(&mut puck, &rink, REBOUND_DAMPING);
        assert_eq!(report.goal, Some(Player::One));
        assert!(!report.bounced);
        assert_eq!(puck.vel, Vec2::new(0.0, -5.0));
    }

    #[test]
    fn test_bottom_goal_scores_for_player_two() {
        let (rink, mut puck) = setup();
        puck.pos = Vec2::new(200.0, 895.0);
        puck.vel = Vec2::new(0.0, 5.0);
        let report = resolve_boundaries(&mut puck, &rink, REBOUND_DAMPING);
        assert_eq!(report.goal, Some(Player::Two));
    }

    #[test]
    fn test_end_wall_outside_mouth_bounces() {
        let (rink, mut puck) = setup();
        puck.pos = Vec2::new(100.0, 5.0);
        puck.vel = Vec2::new(0.0, -5.0);
        let report = resolve_boundaries(&mut puck, &rink, REBOUND_DAMPING);
        assert_eq!(report.goal, None);
        assert_eq!(puck.pos.y, puck.radius);
        assert!((puck.vel.y - 5.0 * REBOUND_DAMPING).abs() < 1e-5);
    }

    #[test]
    fn test_launch_after_goal_heads_away_from_scorer() {
        let (rink, mut puck) = setup();
        let tuning = PhysicsTuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            launch_puck(&mut puck, &rink, &tuning, Some(Player::One), &mut rng);
            assert!(puck.vel.y < 0.0, "toward player 2");
            // within ±45° of straight up
            assert!(puck.vel.x.abs() <= puck.vel.y.abs() + 1e-4);
            launch_puck(&mut puck, &rink, &tuning, Some(Player::Two), &mut rng);
            assert!(puck.vel.y > 0.0, "toward player 1");
        }
    }

    #[test]
    fn test_launch_speed_band_and_position() {
        let rink = Rink::new(1000.0, 1800.0);
        let mut puck = Puck::new(&rink, PUCK_MASS);
        puck.pos = Vec2::new(10.0, 10.0);
        let tuning = PhysicsTuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..50 {
            launch_puck(&mut puck, &rink, &tuning, None, &mut rng);
            assert_eq!(puck.pos, rink.center());
            let speed = puck.speed();
            assert!(speed >= 8.0 - 1e-3 && speed <= 12.0 + 1e-3, "speed {speed}");
        }
    }
}
