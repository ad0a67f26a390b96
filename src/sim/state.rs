//! Match state
//!
//! One explicit context object per match: rink, bodies, the optional AI
//! session and the seeded RNG. Nothing in the simulation is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::{AiController, AiMode};
use super::ai::profile::AiProfile;
use super::body::{Paddle, Player, Puck, Side};
use super::boundary::launch_puck;
use super::rink::Rink;
use crate::settings::PhysicsTuning;

/// Match phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Bodies placed, puck not yet served
    Waiting,
    /// Active play
    Playing,
    /// Frozen by the player
    Paused,
    /// Win score reached; only a reset leaves this phase
    Over,
}

/// Complete state of one match
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rink: Rink,
    pub tuning: PhysicsTuning,
    pub puck: Puck,
    /// Player 1, lower half
    pub home: Paddle,
    /// Player 2 or the AI, upper half
    pub away: Paddle,
    /// Drives the Away paddle when present
    pub ai: Option<AiController>,
    pub phase: MatchPhase,
    /// Scorer of the most recent goal; `None` until the first goal
    pub last_scorer: Option<Player>,
    /// Frames advanced while playing
    pub time_ticks: u64,
    pub(crate) exit_requested: bool,
    pub(crate) rng: Pcg32,
}

impl MatchState {
    /// New match with bodies at their starting spots, waiting for the serve
    pub fn new(rink: Rink, tuning: PhysicsTuning, opponent: Option<AiProfile>, seed: u64) -> Self {
        let tuning = tuning.sanitized();
        let puck = Puck::new(&rink, tuning.puck_mass);
        let home = Paddle::new(Side::Home, &rink, tuning.paddle_mass, tuning.paddle_speed);
        let away = Paddle::new(Side::Away, &rink, tuning.paddle_mass, tuning.paddle_speed);
        let ai = opponent.map(|profile| AiController::new(profile, &rink));

        Self {
            seed,
            rink,
            tuning,
            puck,
            home,
            away,
            ai,
            phase: MatchPhase::Waiting,
            last_scorer: None,
            time_ticks: 0,
            exit_requested: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Serve the first puck of the match in a uniformly random direction
    pub fn start(&mut self) {
        if self.phase != MatchPhase::Waiting {
            return;
        }
        launch_puck(&mut self.puck, &self.rink, &self.tuning, None, &mut self.rng);
        self.phase = MatchPhase::Playing;
        log::info!(
            "Match started (seed {}, {}x{} rink, {})",
            self.seed,
            self.rink.width,
            self.rink.height,
            if self.ai.is_some() { "vs AI" } else { "local" }
        );
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            MatchPhase::Playing => MatchPhase::Paused,
            MatchPhase::Paused => MatchPhase::Playing,
            other => other,
        };
    }

    /// Stop the frame loop; the next frame returns without touching state
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Put the puck back on the centre spot after a goal and serve it away from the scorer
    pub fn serve_after_goal(&mut self, scorer: Player) {
        self.last_scorer = Some(scorer);
        launch_puck(&mut self.puck, &self.rink, &self.tuning, Some(scorer), &mut self.rng);
        if let Some(ai) = self.ai.as_mut() {
            ai.reset(&self.rink);
        }
    }

    /// Freeze the match after the final goal with the puck at rest on the centre spot
    pub fn finish(&mut self) {
        self.puck.recenter(&self.rink);
        self.phase = MatchPhase::Over;
    }

    /// Back to the opening position, waiting for a serve
    pub fn reset(&mut self) {
        self.puck.recenter(&self.rink);
        self.home.reset(&self.rink);
        self.away.reset(&self.rink);
        if let Some(ai) = self.ai.as_mut() {
            ai.reset(&self.rink);
        }
        self.phase = MatchPhase::Waiting;
        self.last_scorer = None;
        self.time_ticks = 0;
        self.exit_requested = false;
    }

    /// Replace (or remove) the AI opponent
    pub fn set_opponent(&mut self, opponent: Option<AiProfile>) {
        self.ai = opponent.map(|profile| AiController::new(profile, &self.rink));
    }

    /// Change the rink size between frames.
    ///
    /// Positions scale with the rink and radii are recomputed; velocities are
    /// left as they are. Paddles are re-clamped to their halves.
    pub fn resize(&mut self, rink: Rink) {
        if rink == self.rink {
            return;
        }
        let factor = Vec2::new(rink.width / self.rink.width, rink.height / self.rink.height);
        log::debug!(
            "Resize {}x{} -> {}x{}",
            self.rink.width,
            self.rink.height,
            rink.width,
            rink.height
        );

        self.rink = rink;

        self.puck.pos *= factor;
        self.puck.prev_pos *= factor;
        self.puck.radius = rink.puck_radius();

        for paddle in [&mut self.home, &mut self.away] {
            paddle.pos *= factor;
            paddle.prev_pos *= factor;
            paddle.radius = rink.paddle_radius();
            paddle.confine(&rink);
        }

        if let Some(ai) = self.ai.as_mut() {
            ai.rescale(factor, &rink);
        }
    }

    /// Read-only view for rendering and UI
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            rink: self.rink,
            phase: self.phase,
            puck: self.puck.pos,
            puck_velocity: self.puck.vel,
            puck_radius: self.puck.radius,
            home: self.home.pos,
            away: self.away.pos,
            paddle_radius: self.home.radius,
            ai_mode: self.ai.as_ref().map(|ai| ai.mode()),
        }
    }
}

/// Positions and state a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub rink: Rink,
    pub phase: MatchPhase,
    pub puck: Vec2,
    pub puck_velocity: Vec2,
    pub puck_radius: f32,
    pub home: Vec2,
    pub away: Vec2,
    pub paddle_radius: f32,
    pub ai_mode: Option<AiMode>,
}
