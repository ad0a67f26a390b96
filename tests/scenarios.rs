//! End-to-end scenarios on the reference 500x900 rink

use air_hockey::PhysicsTuning;
use air_hockey::consts::REBOUND_DAMPING;
use air_hockey::sim::{
    AiController, AiMode, Difficulty, FrameInput, FrameOutcome, MatchState, Paddle, Player, Puck, Rink, Side,
    advance_frame,
};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn reference_match() -> MatchState {
    let mut game = MatchState::new(Rink::new(500.0, 900.0), PhysicsTuning::default(), None, 1);
    game.start();
    game
}

#[test]
fn test_resting_puck_stays_put() {
    let mut game = reference_match();
    game.puck.pos = game.rink.center();
    game.puck.vel = Vec2::ZERO;

    // one second of 16ms frames
    for _ in 0..63 {
        let outcome = advance_frame(&mut game, 16.0, &FrameInput::default(), |_| panic!("no goal expected"));
        assert_eq!(outcome, FrameOutcome::Advanced);
    }

    assert_eq!(game.puck.pos, Vec2::new(250.0, 450.0));
    assert_eq!(game.puck.vel, Vec2::ZERO);
}

#[test]
fn test_puck_into_top_goal_scores_for_player_one() {
    let mut game = reference_match();
    assert_eq!(game.rink.goal_x(), 150.0);
    assert_eq!(game.rink.goal_width(), 200.0);
    game.puck.pos = Vec2::new(250.0, 10.0);
    game.puck.vel = Vec2::new(0.0, -5.0);

    let mut calls = Vec::new();
    advance_frame(&mut game, 16.0, &FrameInput::default(), |p| calls.push(p));

    assert_eq!(calls, vec![Player::One]);
    assert_eq!(game.puck.pos, game.rink.center());
    assert!(game.puck.speed() > 0.0);
}

#[test]
fn test_puck_outside_mouth_bounces_off_end_wall() {
    let mut game = reference_match();
    game.puck.pos = Vec2::new(50.0, 10.0);
    game.puck.vel = Vec2::new(0.0, -5.0);

    let mut calls = 0;
    let outcome = advance_frame(&mut game, 16.0, &FrameInput::default(), |_| calls += 1);

    assert_eq!(calls, 0);
    assert_eq!(outcome, FrameOutcome::Advanced);
    assert_eq!(game.puck.pos.y, game.puck.radius);
    assert!(game.puck.vel.y > 0.0);
    let expected = 5.0 * PhysicsTuning::default().friction * REBOUND_DAMPING;
    assert!((game.puck.vel.y - expected).abs() < 1e-4, "dy {}", game.puck.vel.y);
}

#[test]
fn test_stopped_puck_sends_ai_to_hit_preparation() {
    let rink = Rink::new(500.0, 900.0);
    let mut profile = Difficulty::Medium.profile();
    profile.stopped_puck_reaction_time = 500.0;

    let mut ai = AiController::new(profile, &rink);
    let mut paddle = Paddle::new(Side::Away, &rink, 5.0, 10.0);
    let mut puck = Puck::new(&rink, 1.0);
    puck.pos = Vec2::new(320.0, 280.0);
    let mut rng = Pcg32::seed_from_u64(5);

    let mut first_prep_ms = None;
    let mut elapsed = 0.0;
    while elapsed < 600.0 {
        elapsed += 16.0;
        let mode = ai.update(&puck, &mut paddle, &rink, 16.0, &mut rng);
        if mode == AiMode::HitPreparing && first_prep_ms.is_none() {
            first_prep_ms = Some(elapsed);
        }
    }

    let at = first_prep_ms.expect("AI never started lining up a hit");
    assert!(at >= 500.0, "started at {at}ms");
    // target sits behind the puck, on the AI's side of it
    assert!(ai.target().y < puck.pos.y);
}

#[test]
fn test_ai_does_not_knock_resting_puck_into_own_goal() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        for seed in 0..6 {
            for x in [190.0, 220.0, 280.0, 310.0] {
                let rink = Rink::new(500.0, 900.0);
                let mut game = MatchState::new(rink, PhysicsTuning::default(), Some(difficulty.profile()), seed);
                game.start();
                game.puck.pos = Vec2::new(x, 60.0);
                game.puck.vel = Vec2::ZERO;

                let mut goals = Vec::new();
                for _ in 0..600 {
                    advance_frame(&mut game, 16.0, &FrameInput::default(), |p| goals.push(p));
                }
                assert!(goals.is_empty(), "{difficulty:?} seed {seed} x {x}: goals {goals:?}");
            }
        }
    }
}
