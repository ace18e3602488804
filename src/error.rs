use thiserror::Error;

use crate::action::PlayerId;

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("game is already over")]
    GameOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl GameError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        GameError::InvalidConfiguration(message.into())
    }
}

/// Responses that break the strategy contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("pile index {0} is out of range")]
    PileIndex(usize),
    #[error("pile {0} cannot be taken")]
    NotTakeable(usize),
    #[error("pile {0} cannot accept a card")]
    NotDrawable(usize),
    #[error("drawing is not possible right now")]
    CannotDraw,
    #[error("taking is not possible right now")]
    CannotTake,
    #[error("action does not answer the pending prompt")]
    UnexpectedAction,
}
