use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Color, MAX_PLAYERS, MIN_PLAYERS, active_colors};
use crate::error::GameError;
use crate::piles::PileMode;
use crate::score::{Scorer, ScoringTable};

/// Global constants for a running game.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub pile_mode: PileMode,
    pub colors: Vec<Color>,
    pub scoring: ScoringTable,
}

impl GameSettings {
    pub fn new(num_players: usize, scoring: ScoringTable) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(GameError::config(format!(
                "players must be between {MIN_PLAYERS} and {MAX_PLAYERS}"
            )));
        }
        Ok(Self {
            num_players,
            pile_mode: PileMode::for_players(num_players),
            colors: active_colors(num_players).to_vec(),
            scoring,
        })
    }

    pub fn is_two_player(&self) -> bool {
        matches!(self.pile_mode, PileMode::TwoPlayer)
    }

    pub fn scorer(&self) -> Scorer<'_> {
        Scorer::new(&self.scoring, &self.colors)
    }
}

/// Public information regarding a pile.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PileView {
    pub cards: Vec<Card>,
    pub taken: bool,
    pub capacity: usize,
}

/// Everything about a player is public in Polychrome: hands are face up.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub hand: Vec<Card>,
    pub out: bool,
    pub score: i32,
    pub is_current: bool,
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
}

/// What the engine is waiting for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    /// The current player may take or draw.
    AwaitingAction,
    /// The current player must name a pile to take.
    AwaitingTake,
    /// The current player must name a pile for the revealed deck card.
    AwaitingPlacement { card: Card },
    GameOver,
}

/// Decision the engine needs before it can continue.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Prompt {
    ChooseAction { player: PlayerId },
    ChooseTake { player: PlayerId, piles: Vec<usize> },
    ChoosePlacement { player: PlayerId, card: Card, piles: Vec<usize> },
    GameOver,
}

impl Prompt {
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Prompt::ChooseAction { player }
            | Prompt::ChooseTake { player, .. }
            | Prompt::ChoosePlacement { player, .. } => Some(*player),
            Prompt::GameOver => None,
        }
    }
}

/// Game state snapshot handed to bots and front-ends.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameView {
    pub settings: GameSettings,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub self_player: PlayerId,
    pub current_player: PlayerId,
    pub round: usize,
    pub last_round: bool,
    pub deck_count: usize,
    pub piles: Vec<PileView>,
    pub takeable: Vec<usize>,
    pub drawable: Vec<usize>,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
}

impl GameView {
    pub fn scorer(&self) -> Scorer<'_> {
        self.settings.scorer()
    }

    pub fn pile_cards(&self, index: usize) -> &[Card] {
        self.piles
            .get(index)
            .map(|pile| pile.cards.as_slice())
            .unwrap_or(&[])
    }

    /// Score change for this player if it took pile `index`.
    pub fn take_gain(&self, index: usize) -> i32 {
        self.scorer().pile_gain(&self.hand, self.pile_cards(index))
    }

    /// Score change for this player if `card` went on pile `index` and it then took the pile.
    pub fn placement_gain(&self, index: usize, card: Card) -> i32 {
        self.scorer()
            .placement_gain(&self.hand, self.pile_cards(index), card)
    }
}
