//! Match bookkeeping on top of the simulation
//!
//! The simulation only reports goals. This layer turns them into scores,
//! arms the goal flash, decides when the match is won and rates the result.

use serde::{Deserialize, Serialize};

use crate::consts::GOAL_FLASH_FRAMES;
use crate::progress::Progress;
use crate::settings::Settings;
use crate::sim::{
    AiProfile, Difficulty, FrameInput, FrameOutcome, MatchState, OpponentCatalog, Player, Rink, Venue,
    advance_frame,
};

/// How the Away paddle is driven and which rules apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Short match against a named ladder opponent
    Classic { venue: Venue, opponent: String },
    /// Open-ended match against a difficulty-level AI
    DuelVsAi(Difficulty),
    /// Two humans
    DuelLocal,
}

impl GameMode {
    pub fn win_score(&self, settings: &Settings) -> u32 {
        match self {
            GameMode::Classic { .. } => settings.classic_win_score,
            GameMode::DuelVsAi(_) | GameMode::DuelLocal => settings.duel_win_score,
        }
    }

    /// AI profile for the Away paddle, if the AI drives it
    pub fn opponent_profile(&self, catalog: &OpponentCatalog) -> Option<AiProfile> {
        match self {
            GameMode::Classic { opponent, .. } => Some(catalog.resolve(opponent)),
            GameMode::DuelVsAi(difficulty) => Some(difficulty.profile()),
            GameMode::DuelLocal => None,
        }
    }

    /// Progress record key `(mode, opponent)` for classic matches
    pub fn progress_key(&self) -> Option<(&'static str, &str)> {
        match self {
            GameMode::Classic { venue, opponent } => Some((venue.mode_key(), opponent.as_str())),
            _ => None,
        }
    }
}

/// Scores and the goal flash counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub player1: u32,
    pub player2: u32,
    pub last_scorer: Option<Player>,
    /// Frames of goal flash remaining
    pub goal_flash: u32,
}

impl Scoreboard {
    /// Credit a goal. Returns the scorer's new total.
    pub fn record_goal(&mut self, scorer: Player) -> u32 {
        self.last_scorer = Some(scorer);
        self.goal_flash = GOAL_FLASH_FRAMES;
        let score = match scorer {
            Player::One => &mut self.player1,
            Player::Two => &mut self.player2,
        };
        *score += 1;
        *score
    }

    pub fn score(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.goal_flash > 0
    }

    /// Count the flash down by one frame
    pub fn tick_flash(&mut self) {
        self.goal_flash = self.goal_flash.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Final result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub winner: Player,
    pub player1: u32,
    pub player2: u32,
    /// Classic-mode rating for a player 1 win; 0 otherwise
    pub stars: u8,
}

/// Stars for winning by `margin` goals
pub fn star_rating(margin: u32) -> u8 {
    match margin {
        m if m >= 5 => 3,
        m if m >= 3 => 2,
        _ => 1,
    }
}

/// What a session tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Exit requested; the frame loop should stop
    Halted,
    /// Nothing to simulate (waiting, paused or finished)
    Idle,
    Advanced,
    Goal {
        scorer: Player,
        player1: u32,
        player2: u32,
    },
    /// The goal that ended the match
    MatchOver(MatchOutcome),
}

/// One match with its scoring rules
#[derive(Debug, Clone)]
pub struct Session {
    game: MatchState,
    scoreboard: Scoreboard,
    mode: GameMode,
    win_score: u32,
    outcome: Option<MatchOutcome>,
}

impl Session {
    pub fn new(mode: GameMode, settings: &Settings, catalog: &OpponentCatalog, rink: Rink, seed: u64) -> Self {
        let game = MatchState::new(rink, settings.tuning.clone(), mode.opponent_profile(catalog), seed);
        Self {
            game,
            scoreboard: Scoreboard::default(),
            win_score: mode.win_score(settings).max(1),
            mode,
            outcome: None,
        }
    }

    pub fn start(&mut self) {
        self.game.start();
    }

    pub fn game(&self) -> &MatchState {
        &self.game
    }

    /// Mutable access for resize, pause and exit
    pub fn game_mut(&mut self) -> &mut MatchState {
        &mut self.game
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn mode(&self) -> &GameMode {
        &self.mode
    }

    pub fn win_score(&self) -> u32 {
        self.win_score
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    /// Advance one frame and apply the scoring rules to whatever happened
    pub fn tick(&mut self, elapsed_ms: f32, input: &FrameInput) -> SessionEvent {
        if self.game.exit_requested() {
            return SessionEvent::Halted;
        }
        self.scoreboard.tick_flash();

        let scoreboard = &mut self.scoreboard;
        let outcome = advance_frame(&mut self.game, elapsed_ms, input, |scorer| {
            scoreboard.record_goal(scorer);
        });

        match outcome {
            FrameOutcome::Halted => SessionEvent::Halted,
            FrameOutcome::Idle => SessionEvent::Idle,
            FrameOutcome::Advanced => SessionEvent::Advanced,
            FrameOutcome::Goal(scorer) => {
                let board = self.scoreboard;
                if board.score(scorer) >= self.win_score {
                    let result = self.finish(scorer);
                    SessionEvent::MatchOver(result)
                } else {
                    SessionEvent::Goal {
                        scorer,
                        player1: board.player1,
                        player2: board.player2,
                    }
                }
            }
        }
    }

    fn finish(&mut self, winner: Player) -> MatchOutcome {
        let board = self.scoreboard;
        let stars = match (&self.mode, winner) {
            (GameMode::Classic { .. }, Player::One) => star_rating(board.player1.saturating_sub(board.player2)),
            _ => 0,
        };
        let result = MatchOutcome {
            winner,
            player1: board.player1,
            player2: board.player2,
            stars,
        };
        self.game.finish();
        self.outcome = Some(result);
        log::info!(
            "Match over: player {} wins {}-{} ({} stars)",
            winner.number(),
            board.player1,
            board.player2,
            stars
        );
        result
    }

    /// Store the classic-mode rating of a finished match. Returns true if it was a new best.
    pub fn record_progress(&self, progress: &mut Progress) -> bool {
        match (self.outcome, self.mode.progress_key()) {
            (Some(result), Some((mode, opponent))) => progress.record(mode, opponent, result.stars),
            _ => false,
        }
    }

    /// Same opponent, fresh scores, back to the opening position
    pub fn restart(&mut self) {
        self.scoreboard.reset();
        self.outcome = None;
        self.game.reset();
    }
}
