//! Per-frame simulation step
//!
//! One call per display refresh. Elapsed time is clamped, then the step runs
//! paddles, puck motion, boundaries, paddle contacts and the speed governor
//! in that order.

use serde::{Deserialize, Serialize};

use super::body::Player;
use super::boundary::resolve_boundaries;
use super::collision::resolve_paddle_collision;
use super::motion::{PaddleInput, integrate_puck, limit_speed, move_paddle};
use super::state::{MatchPhase, MatchState};
use crate::clamp_elapsed;

/// Input for a single frame, sampled at tick time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Player 1 (lower half)
    pub home: PaddleInput,
    /// Player 2; ignored when the AI drives the Away paddle
    pub away: PaddleInput,
}

/// What a frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Exit was requested; nothing changed
    Halted,
    /// Waiting, paused or over; nothing changed
    Idle,
    /// Bodies moved, no goal
    Advanced,
    /// A goal was scored and the puck re-served
    Goal(Player),
}

/// Advance the match by one frame.
///
/// `on_goal` is called exactly once when this frame produces a goal, before
/// the puck is re-served.
pub fn advance_frame<F>(state: &mut MatchState, elapsed_ms: f32, input: &FrameInput, mut on_goal: F) -> FrameOutcome
where
    F: FnMut(Player),
{
    if state.exit_requested {
        return FrameOutcome::Halted;
    }
    if state.phase != MatchPhase::Playing {
        return FrameOutcome::Idle;
    }

    let elapsed = clamp_elapsed(elapsed_ms);
    state.time_ticks += 1;

    // Paddles
    move_paddle(&mut state.home, &input.home, elapsed, &state.rink);
    match state.ai.as_mut() {
        Some(ai) => {
            ai.update(&state.puck, &mut state.away, &state.rink, elapsed, &mut state.rng);
        }
        None => move_paddle(&mut state.away, &input.away, elapsed, &state.rink),
    }

    // Puck
    integrate_puck(&mut state.puck, elapsed, state.tuning.friction);

    let report = resolve_boundaries(&mut state.puck, &state.rink, state.tuning.rebound_damping);
    if let Some(scorer) = report.goal {
        log::info!("Goal for player {}", scorer.number());
        on_goal(scorer);
        state.serve_after_goal(scorer);
        return FrameOutcome::Goal(scorer);
    }

    for paddle in [&state.home, &state.away] {
        resolve_paddle_collision(&mut state.puck, paddle, &state.rink, &state.tuning, &mut state.rng);
    }

    let limit = state.rink.puck_speed_limit(state.tuning.speed_limit);
    limit_speed(&mut state.puck, limit);

    FrameOutcome::Advanced
}
