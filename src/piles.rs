//! Shared piles and the rules for taking from and drawing onto them.

use serde::{Deserialize, Serialize};

use crate::card::{Card, PILE_CAPACITY};
use crate::error::InvalidAction;

/// Number of piles used when exactly two players sit at the table.
pub const TWO_PLAYER_PILES: usize = 3;

/// Which capacity rule the piles follow.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PileMode {
    /// One pile per player, each holding up to three cards.
    Standard { piles: usize },
    /// Three piles holding at most 1, 2 and 3 cards respectively.
    TwoPlayer,
}

impl PileMode {
    pub fn for_players(num_players: usize) -> Self {
        if num_players == 2 {
            PileMode::TwoPlayer
        } else {
            PileMode::Standard { piles: num_players }
        }
    }

    pub fn pile_count(&self) -> usize {
        match self {
            PileMode::Standard { piles } => *piles,
            PileMode::TwoPlayer => TWO_PLAYER_PILES,
        }
    }

    /// Maximum number of cards pile `index` may hold.
    pub fn capacity(&self, index: usize) -> usize {
        match self {
            PileMode::Standard { .. } => PILE_CAPACITY,
            PileMode::TwoPlayer => index + 1,
        }
    }
}

/// A face-up pile on the table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    pub cards: Vec<Card>,
    pub taken: bool,
}

/// All piles of the current round.
#[derive(Clone, Debug)]
pub struct Piles {
    mode: PileMode,
    piles: Vec<Pile>,
}

impl Piles {
    pub fn new(mode: PileMode) -> Self {
        Self {
            mode,
            piles: vec![Pile::default(); mode.pile_count()],
        }
    }

    pub fn mode(&self) -> PileMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.piles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Pile> {
        self.piles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pile> {
        self.piles.iter()
    }

    pub fn capacity(&self, index: usize) -> usize {
        self.mode.capacity(index)
    }

    /// Total number of cards sitting on the table.
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(|pile| pile.cards.len()).sum()
    }

    /// Empties every pile and clears the taken flags.
    pub fn reset(&mut self) {
        for pile in &mut self.piles {
            pile.cards.clear();
            pile.taken = false;
        }
    }

    /// Piles a player may take: untaken and holding at least one card.
    pub fn takeable(&self) -> Vec<usize> {
        self.piles
            .iter()
            .enumerate()
            .filter(|(_, pile)| !pile.taken && !pile.cards.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    /// Piles that can receive a drawn card.
    pub fn drawable(&self) -> Vec<usize> {
        self.piles
            .iter()
            .enumerate()
            .filter(|(index, pile)| !pile.taken && self.accepts_card(*index, pile))
            .map(|(index, _)| index)
            .collect()
    }

    fn accepts_card(&self, index: usize, pile: &Pile) -> bool {
        match self.mode {
            PileMode::Standard { .. } => pile.cards.len() < PILE_CAPACITY,
            PileMode::TwoPlayer => pile.cards.len() <= index,
        }
    }

    /// True when every untaken pile holds as many cards as it can.
    pub fn all_full(&self) -> bool {
        self.piles
            .iter()
            .enumerate()
            .filter(|(_, pile)| !pile.taken)
            .all(|(index, pile)| pile.cards.len() >= self.capacity(index))
    }

    /// True when no card has been placed this round (or every placed card was taken).
    pub fn all_empty(&self) -> bool {
        self.piles.iter().all(|pile| pile.cards.is_empty())
    }

    pub(crate) fn place(&mut self, index: usize, card: Card) -> Result<(), InvalidAction> {
        let pile = self.piles.get(index).ok_or(InvalidAction::PileIndex(index))?;
        if pile.taken || !self.accepts_card(index, pile) {
            return Err(InvalidAction::NotDrawable(index));
        }
        self.piles[index].cards.push(card);
        Ok(())
    }

    pub(crate) fn take(&mut self, index: usize) -> Result<Vec<Card>, InvalidAction> {
        let pile = self
            .piles
            .get_mut(index)
            .ok_or(InvalidAction::PileIndex(index))?;
        if pile.taken || pile.cards.is_empty() {
            return Err(InvalidAction::NotTakeable(index));
        }
        pile.taken = true;
        Ok(std::mem::take(&mut pile.cards))
    }
}
