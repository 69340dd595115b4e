//! Slice World headless runner
//!
//! Plays scripted rounds with an autopilot blade at 60 Hz and logs the
//! event stream. Usage: `slice-world [tuning.json] [seed]`

use std::process::ExitCode;

use glam::Vec2;

use slice_world::consts::{DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
use slice_world::sim::{
    GameEvent, GameState, ObjectKind, PointerEvent, TickInput, activate_shield, advance,
    cast_star_slash, start_round,
};
use slice_world::{HighScores, Tuning};

/// Host frame period (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Rounds to play before exiting
const ROUNDS: u32 = 3;
/// Autopilot casts star slash once per round at this score
const STAR_SLASH_SCORE: u32 = 25;
/// A round is abandoned after this long (ms)
const MAX_ROUND_MS: f64 = 120_000.0;

/// Host-side wrapper: simulation plus the collaborators it feeds
struct Game {
    state: GameState,
    high_scores: HighScores,
    now: f64,
    rounds_played: u32,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Self {
        let field = Vec2::new(DEFAULT_FIELD_WIDTH, DEFAULT_FIELD_HEIGHT);
        Self {
            state: GameState::new(seed, field, tuning),
            high_scores: HighScores::new(),
            now: 0.0,
            rounds_played: 0,
        }
    }

    /// Blade stroke across the lowest sliceable object still inside the field
    fn autopilot(&self) -> TickInput {
        let field = self.state.field;
        let target = self
            .state
            .objects
            .iter()
            .filter(|o| !o.sliced && o.kind != ObjectKind::Bomb)
            .map(|o| o.center())
            .filter(|c| c.x > 0.0 && c.x < field.x && c.y > 0.0 && c.y < field.y)
            .max_by(|a, b| a.y.total_cmp(&b.y));

        match target {
            Some(c) => TickInput::new([
                PointerEvent::Begin(c - Vec2::new(30.0, 10.0)),
                PointerEvent::Move(c + Vec2::new(30.0, 10.0)),
                PointerEvent::End,
            ]),
            None => TickInput::default(),
        }
    }

    fn play_round(&mut self) {
        start_round(&mut self.state, self.now);
        activate_shield(&mut self.state);
        let round_start = self.now;
        let mut star_slash_ready = true;

        while !self.state.round.is_over() && self.now - round_start < MAX_ROUND_MS {
            self.now += FRAME_MS;
            let input = self.autopilot();
            advance(&mut self.state, &input, self.now);

            if star_slash_ready && self.state.round.score >= STAR_SLASH_SCORE {
                cast_star_slash(&mut self.state, self.now);
                star_slash_ready = false;
            }
            self.handle_events();
        }
        self.rounds_played += 1;
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            log::debug!("{:?}", event);
            if let GameEvent::GameOver { final_score } = event {
                log::info!("Round {} over with {}", self.rounds_played + 1, final_score);
            }
            if let Some(rank) = self.high_scores.record_event(&event, self.now) {
                log::info!("High score rank {rank}");
            }
        }
    }
}

fn load_tuning(path: Option<&str>) -> Result<Tuning, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(Tuning::from_json(&json)?)
        }
        None => Ok(Tuning::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Slice World (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = match load_tuning(args.first().map(String::as_str)) {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("Could not load tuning: {e}");
            return ExitCode::FAILURE;
        }
    };
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(0x5eed);

    let mut game = Game::new(seed, tuning);
    while game.rounds_played < ROUNDS {
        game.play_round();
    }

    println!("Played {} rounds (seed {seed})", game.rounds_played);
    for (i, entry) in game.high_scores.entries.iter().enumerate() {
        println!("{:>2}. {}", i + 1, entry.score);
    }
    ExitCode::SUCCESS
}
