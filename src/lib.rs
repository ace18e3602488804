//! Polychrome card game engine with scoring, rule-based bots and batch simulation.

pub mod action;
pub mod batch;
pub mod bot;
pub mod bots;
pub mod card;
pub mod error;
pub mod game;
pub mod log;
pub mod piles;
pub mod score;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, PlayerId, TurnChoice};
pub use crate::batch::{BatchConfig, BatchSummary, GameRecord, SeatSpec, SeatSummary, run_batch, run_game};
pub use crate::bot::Bot;
pub use crate::bots::registry::{create_bot_from_spec, label_for_spec};
pub use crate::bots::{BuilderBot, GreedyBot, HumanBot, RandomBot};
pub use crate::card::{Card, Color};
pub use crate::error::{GameError, InvalidAction};
pub use crate::game::{Game, GameBuilder, GameConfig};
pub use crate::log::{GameEvent, GameLog, LogMode};
pub use crate::piles::{Pile, PileMode, Piles};
pub use crate::score::{Scorer, ScoringTable};
pub use crate::state::{GameSettings, GameStatus, GameView, PileView, PlayerPublicState, Prompt, TurnPhase};
pub use crate::visualize::{VisualOptions, describe_action, describe_prompt, render_state};
