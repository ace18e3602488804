use serde::{Deserialize, Serialize};

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Free choice offered at the start of a turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TurnChoice {
    /// Claim a whole pile and drop out of the round.
    Take,
    /// Reveal the top deck card and place it on a pile.
    Draw,
}

/// Response to a [`Prompt`](crate::state::Prompt).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Answer to `Prompt::ChooseAction`.
    Choose(TurnChoice),
    /// Answer to `Prompt::ChooseTake`.
    TakePile(usize),
    /// Answer to `Prompt::ChoosePlacement`.
    PlaceCard(usize),
}

impl Action {
    /// Returns the pile index if the action names one.
    pub fn pile(&self) -> Option<usize> {
        match self {
            Action::TakePile(pile) | Action::PlaceCard(pile) => Some(*pile),
            Action::Choose(_) => None,
        }
    }
}
