//! Simulation core
//!
//! All gameplay physics lives here. This module stays free of I/O:
//! - One variable step per frame, elapsed time clamped at the boundary
//! - Randomness only from the match's seeded RNG (or an injected one)
//! - Goals are reported, never scored here

pub mod ai;
pub mod body;
pub mod boundary;
pub mod collision;
pub mod geometry;
pub mod motion;
pub mod rink;
pub mod state;
pub mod tick;

pub use ai::hit::HitPhase;
pub use ai::profile::{AiProfile, DEFAULT_OPPONENT, Difficulty, Opponent, OpponentCatalog, Venue};
pub use ai::{AiController, AiMode};
pub use body::{Paddle, Player, Puck, Side};
pub use boundary::{BoundaryReport, launch_puck, resolve_boundaries};
pub use collision::{CollisionOutcome, check_collision, resolve_paddle_collision};
pub use motion::{PaddleInput, integrate_puck, limit_speed, move_paddle};
pub use rink::Rink;
pub use state::{MatchPhase, MatchSnapshot, MatchState};
pub use tick::{FrameInput, FrameOutcome, advance_frame};
