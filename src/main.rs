//! Air Hockey - headless match runner
//!
//! Plays one classic match against a named opponent with player 1 driven by a
//! simple puck-chasing script, logging goals and the result.
//!
//! Usage: `air-hockey [opponent] [settings.json] [progress.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the host page; there is no native loop here
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use air_hockey::consts::REFERENCE_TICK_MS;
    use air_hockey::sim::{DEFAULT_OPPONENT, FrameInput, MatchState, OpponentCatalog, PaddleInput, Rink, Venue};
    use air_hockey::{GameMode, Progress, Session, SessionEvent, Settings};

    /// Ten minutes of simulated play
    const MAX_FRAMES: u32 = 37_500;

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let opponent = args.next().unwrap_or_else(|| DEFAULT_OPPONENT.to_string());
        let settings = args
            .next()
            .map(|path| Settings::load_or_default(&PathBuf::from(path)))
            .unwrap_or_default();
        let progress_path = args.next().map(PathBuf::from);

        let catalog = OpponentCatalog::classic();
        let (venue, opponent) = match catalog.get(&opponent) {
            Some(found) => (found.venue, found.name.clone()),
            None => {
                log::warn!("Opponent \"{opponent}\" not found. Using {DEFAULT_OPPONENT}.");
                let fallback = catalog
                    .get(DEFAULT_OPPONENT)
                    .map(|o| o.venue)
                    .unwrap_or(Venue::Arcade);
                (fallback, DEFAULT_OPPONENT.to_string())
            }
        };

        let seed = settings.seed.unwrap_or_else(rand::random);
        let mode = GameMode::Classic {
            venue,
            opponent: opponent.clone(),
        };
        let rink = Rink::fit_viewport(520.0, 940.0);
        let mut session = Session::new(mode, &settings, &catalog, rink, seed);

        log::info!("Air Hockey: {} at the {}", opponent, venue.display_name());
        session.start();

        let mut frames = 0;
        while frames < MAX_FRAMES {
            let input = FrameInput {
                home: chase_puck(session.game()),
                ..Default::default()
            };
            match session.tick(REFERENCE_TICK_MS, &input) {
                SessionEvent::Goal {
                    scorer,
                    player1,
                    player2,
                } => log::info!("Player {} scores: {player1}-{player2}", scorer.number()),
                SessionEvent::MatchOver(_) | SessionEvent::Halted => break,
                SessionEvent::Idle | SessionEvent::Advanced => {}
            }
            frames += 1;
        }

        match session.outcome() {
            Some(result) => println!(
                "Player {} wins {}-{} against {opponent} ({} stars)",
                result.winner.number(),
                result.player1,
                result.player2,
                result.stars
            ),
            None => {
                let board = session.scoreboard();
                println!("Time up at {}-{} against {opponent}", board.player1, board.player2);
            }
        }

        if let Some(path) = progress_path {
            let mut progress = Progress::load(&path).unwrap_or_else(|err| {
                log::warn!("Starting fresh progress: {err}");
                Progress::new()
            });
            if session.record_progress(&mut progress) {
                if let Err(err) = progress.save(&path) {
                    log::warn!("Could not save progress: {err}");
                }
            }
        }
    }

    /// Player 1 script: get under the puck when it is on our half, otherwise drift home
    fn chase_puck(game: &MatchState) -> PaddleInput {
        let paddle = &game.home;
        let puck = &game.puck;
        let deadzone = paddle.radius * 0.2;

        let target = if puck.pos.y > game.rink.center_line() {
            // Stay goal-side of the puck so contact sends it up the rink
            puck.pos + glam::Vec2::new(0.0, puck.radius + paddle.radius * 0.5)
        } else {
            game.rink.paddle_start(paddle.side)
        };
        let delta = target - paddle.pos;

        PaddleInput {
            up: delta.y < -deadzone,
            down: delta.y > deadzone,
            left: delta.x < -deadzone,
            right: delta.x > deadzone,
        }
    }
}
