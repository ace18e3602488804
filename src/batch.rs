//! Batch simulation: many sequential games between the same seats.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::action::PlayerId;
use crate::bot::Bot;
use crate::bots::registry::{create_bot_from_spec, label_for_spec, lookup};
use crate::error::GameError;
use crate::game::GameBuilder;
use crate::log::LogMode;
use crate::score::ScoringTable;

/// One seat at the table: a registry spec plus the player's display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSpec {
    pub spec: String,
    pub name: String,
}

impl SeatSpec {
    pub fn new(spec: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            spec: spec.into(),
            name: name.into(),
        }
    }

    /// Seats named "Player 1", "Player 2", ... in order.
    pub fn numbered<I, S>(specs: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        specs
            .into_iter()
            .enumerate()
            .map(|(index, spec)| Self::new(spec, format!("Player {}", index + 1)))
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub seats: Vec<SeatSpec>,
    pub scoring: ScoringTable,
    pub games: usize,
    pub seed: u64,
    /// Keep every game's text log in its [`GameRecord`].
    pub keep_logs: bool,
}

/// Outcome of one finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub scores: Vec<i32>,
    pub winner: PlayerId,
    pub rounds: usize,
    pub log: String,
}

/// Aggregate results for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatSummary {
    pub name: String,
    pub label: String,
    pub wins: usize,
    pub total_score: i64,
}

impl SeatSummary {
    pub fn win_rate(&self, games: usize) -> f64 {
        if games == 0 {
            0.0
        } else {
            self.wins as f64 / games as f64
        }
    }

    pub fn average_score(&self, games: usize) -> f64 {
        if games == 0 {
            0.0
        } else {
            self.total_score as f64 / games as f64
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub games: Vec<GameRecord>,
    pub seats: Vec<SeatSummary>,
}

/// Plays one game to completion with freshly built bots for every seat.
pub fn run_game(
    seats: &[SeatSpec],
    scoring: &ScoringTable,
    seed: u64,
) -> Result<GameRecord, GameError> {
    let mut game = GameBuilder::new(seats.iter().map(|seat| seat.name.clone()))?
        .with_seed(seed)
        .with_scoring(scoring.clone())
        .with_log_mode(LogMode::Buffer)
        .build()?;
    let mut bots: Vec<Box<dyn Bot>> = seats
        .iter()
        .enumerate()
        .map(|(index, seat)| create_bot_from_spec(&seat.spec, index, mix_seed(seed, 0, index as u64)))
        .collect::<Result<_, _>>()?;
    game.play_to_completion(&mut bots)?;
    let winner = game.winner().ok_or(GameError::GameOver)?;
    Ok(GameRecord {
        seed,
        scores: game.scores(),
        winner,
        rounds: game.round(),
        log: game.flush_log(),
    })
}

/// Runs `config.games` games one after another.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary, GameError> {
    if config.games == 0 {
        return Err(GameError::config("number of games must be at least 1"));
    }
    for seat in &config.seats {
        match lookup(&seat.spec) {
            Some(entry) if entry.interactive => {
                return Err(GameError::config(format!(
                    "interactive player '{}' cannot join a batch run",
                    seat.spec
                )));
            }
            Some(_) => {}
            None => {
                return Err(GameError::config(format!(
                    "unrecognized bot spec '{}'",
                    seat.spec
                )));
            }
        }
    }

    info!(
        games = config.games,
        seats = ?config.seats.iter().map(|s| s.spec.as_str()).collect::<Vec<_>>(),
        scoring = %config.scoring,
        "starting batch simulation"
    );

    let mut seats: Vec<SeatSummary> = config
        .seats
        .iter()
        .map(|seat| SeatSummary {
            name: seat.name.clone(),
            label: label_for_spec(&seat.spec),
            wins: 0,
            total_score: 0,
        })
        .collect();
    let mut games = Vec::with_capacity(config.games);

    for game_idx in 0..config.games {
        let seed = mix_seed(config.seed, game_idx as u64, 0x5EED_15);
        let mut record = run_game(&config.seats, &config.scoring, seed)?;
        debug!(
            game = game_idx + 1,
            winner = record.winner,
            rounds = record.rounds,
            scores = ?record.scores,
            "game finished"
        );
        seats[record.winner].wins += 1;
        for (seat, score) in seats.iter_mut().zip(&record.scores) {
            seat.total_score += i64::from(*score);
        }
        if !config.keep_logs {
            record.log.clear();
        }
        games.push(record);
    }

    info!(games = games.len(), "batch simulation finished");
    Ok(BatchSummary { games, seats })
}

/// Derives independent seeds from a base seed and two counters.
pub fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B97F4A7C15)) ^ (b.wrapping_mul(0xBF58_476D1CE4E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}
