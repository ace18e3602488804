//! Scoring utilities for Polychrome hands.
//!
//! A hand scores per color through a [`ScoringTable`]: the three best colors
//! count positively, every other color counts against the player. Wildcards
//! are assigned to whichever colors maximize the total, and each bonus card
//! adds two points.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::{BONUS_POINTS, Card, Color};
use crate::error::GameError;

/// Number of colors that count positively.
const SCORING_COLORS: usize = 3;

/// Largest accepted table entry. Seven colors at this value still sum and
/// subtract inside `i32`.
pub const MAX_TABLE_VALUE: u32 = (i32::MAX / 8) as u32;

/// Points awarded per number of cards held in one color.
///
/// Index 0 is the value of holding no card of a color; the last entry is a
/// saturating cap for any larger count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct ScoringTable(Vec<u32>);

impl ScoringTable {
    pub fn new(values: Vec<u32>) -> Result<Self, GameError> {
        if values.is_empty() {
            return Err(GameError::config("scoring table must not be empty"));
        }
        if let Some(value) = values.iter().find(|value| **value > MAX_TABLE_VALUE) {
            return Err(GameError::config(format!(
                "scoring table entry {value} exceeds {MAX_TABLE_VALUE}"
            )));
        }
        Ok(Self(values))
    }

    /// Triangular table, rewarding large sets.
    pub fn scoring1() -> Self {
        Self(vec![0, 1, 3, 6, 10, 15, 21])
    }

    /// Table that peaks at three cards and decays afterwards.
    pub fn scoring2() -> Self {
        Self(vec![0, 1, 4, 8, 7, 6, 5])
    }

    /// Names accepted by [`ScoringTable::from_name`].
    pub const PRESETS: [&'static str; 2] = ["scoring1", "scoring2"];

    pub fn from_name(name: &str) -> Result<Self, GameError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "scoring1" => Ok(Self::scoring1()),
            "scoring2" => Ok(Self::scoring2()),
            other => Err(GameError::config(format!(
                "unsupported scoring table '{other}' (expected one of {})",
                Self::PRESETS.join(", ")
            ))),
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of holding `count` cards of one color, saturating at the last entry.
    pub fn value(&self, count: usize) -> i32 {
        let index = count.min(self.0.len().saturating_sub(1));
        self.0
            .get(index)
            .map_or(0, |value| i32::try_from(*value).unwrap_or(i32::MAX))
    }

    /// Score of final per-color counts, ignoring wildcards and bonus cards.
    pub fn provisional(&self, counts: &[usize]) -> i32 {
        let mut values: Vec<i32> = counts.iter().map(|&count| self.value(count)).collect();
        values.sort_unstable_by(|a, b| b.cmp(a));
        values
            .iter()
            .enumerate()
            .map(|(rank, value)| if rank < SCORING_COLORS { *value } else { -value })
            .sum()
    }
}

impl TryFrom<Vec<u32>> for ScoringTable {
    type Error = GameError;

    fn try_from(values: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl From<ScoringTable> for Vec<u32> {
    fn from(table: ScoringTable) -> Self {
        table.0
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::scoring1()
    }
}

impl fmt::Display for ScoringTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Scores hands against a table and the palette of colors in play.
#[derive(Clone, Copy, Debug)]
pub struct Scorer<'a> {
    table: &'a ScoringTable,
    colors: &'a [Color],
}

impl<'a> Scorer<'a> {
    pub fn new(table: &'a ScoringTable, colors: &'a [Color]) -> Self {
        Self { table, colors }
    }

    pub fn score(&self, cards: &[Card]) -> i32 {
        self.score_iter(cards)
    }

    /// Scores any collection of cards without concatenating them first.
    pub fn score_iter<'c>(&self, cards: impl IntoIterator<Item = &'c Card>) -> i32 {
        let mut counts = vec![0usize; self.colors.len()];
        let mut wilds = 0usize;
        let mut bonus = 0i32;
        for card in cards {
            match card {
                Card::Color(color) => {
                    if let Some(slot) = self.colors.iter().position(|c| c == color) {
                        counts[slot] += 1;
                    }
                }
                Card::Wild => wilds += 1,
                Card::Bonus => bonus += 1,
            }
        }
        let best = if wilds == 0 || counts.is_empty() {
            self.table.provisional(&counts)
        } else {
            best_assignment(self.table, &mut counts, wilds, 0)
        };
        best + BONUS_POINTS * bonus
    }

    /// Change in score if `hand` picked up every card in `pile`.
    pub fn pile_gain(&self, hand: &[Card], pile: &[Card]) -> i32 {
        self.score_iter(hand.iter().chain(pile)) - self.score(hand)
    }

    /// Change in score if `hand` picked up `pile` after `card` was placed on it.
    pub fn placement_gain(&self, hand: &[Card], pile: &[Card], card: Card) -> i32 {
        self.score_iter(hand.iter().chain(pile).chain(std::iter::once(&card))) - self.score(hand)
    }
}

/// Walks every multiset of `wilds` color slots (combinations with replacement,
/// slots never decreasing from `start`) and returns the best provisional score.
fn best_assignment(table: &ScoringTable, counts: &mut [usize], wilds: usize, start: usize) -> i32 {
    if wilds == 0 {
        return table.provisional(counts);
    }
    let mut best = i32::MIN;
    for slot in start..counts.len() {
        counts[slot] += 1;
        best = best.max(best_assignment(table, counts, wilds - 1, slot));
        counts[slot] -= 1;
    }
    best
}
