use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the seven tile colors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Color {
    Green,
    Blue,
    Brown,
    Yellow,
    Gray,
    Pink,
    Orange,
}

impl Color {
    /// Every color in deck order. Smaller games drop colors from the front.
    pub const ALL: [Color; 7] = [
        Color::Green,
        Color::Blue,
        Color::Brown,
        Color::Yellow,
        Color::Gray,
        Color::Pink,
        Color::Orange,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Brown => "brown",
            Color::Yellow => "yellow",
            Color::Gray => "gray",
            Color::Pink => "pink",
            Color::Orange => "orange",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Representation of a Polychrome card.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Card {
    /// Colored tile.
    Color(Color),
    /// Counts as any color when scoring.
    Wild,
    /// Worth two points on its own.
    Bonus,
}

pub const COPIES_PER_COLOR: usize = 9;
pub const WILD_COUNT: usize = 3;
pub const BONUS_COUNT: usize = 10;
pub const BONUS_POINTS: i32 = 2;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;
/// Standard-mode pile capacity.
pub const PILE_CAPACITY: usize = 3;
/// Remaining deck size below which the current round becomes the last one.
pub const LAST_ROUND_THRESHOLD: usize = 15;

impl Card {
    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild)
    }

    #[inline]
    pub fn is_bonus(&self) -> bool {
        matches!(self, Card::Bonus)
    }

    /// Returns the color when the card is a colored tile.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        match self {
            Card::Color(color) => Some(*color),
            Card::Wild | Card::Bonus => None,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Color(color) => color.fmt(f),
            Card::Wild => f.write_str("wild"),
            Card::Bonus => f.write_str("+2"),
        }
    }
}

/// Number of colors removed from the front of [`Color::ALL`] for a player count.
pub fn reduce_colors_by(num_players: usize) -> usize {
    match num_players {
        2 => 2,
        3 => 1,
        _ => 0,
    }
}

/// Colors in play for the given number of players.
pub fn active_colors(num_players: usize) -> &'static [Color] {
    &Color::ALL[reduce_colors_by(num_players)..]
}

/// Builds the deck for a player count in deterministic order (unshuffled).
pub fn full_deck(num_players: usize) -> Vec<Card> {
    let colors = active_colors(num_players);
    let mut deck = Vec::with_capacity(colors.len() * COPIES_PER_COLOR + WILD_COUNT + BONUS_COUNT);
    for _ in 0..COPIES_PER_COLOR {
        deck.extend(colors.iter().map(|color| Card::Color(*color)));
    }
    deck.extend(std::iter::repeat_n(Card::Wild, WILD_COUNT));
    deck.extend(std::iter::repeat_n(Card::Bonus, BONUS_COUNT));
    deck
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_size_follows_player_count() {
        assert_eq!(full_deck(2).len(), 5 * 9 + 13);
        assert_eq!(full_deck(3).len(), 6 * 9 + 13);
        assert_eq!(full_deck(4).len(), 7 * 9 + 13);
        assert_eq!(full_deck(5).len(), 7 * 9 + 13);
    }

    #[test]
    fn two_player_palette_drops_first_colors() {
        let colors = active_colors(2);
        assert_eq!(colors.len(), 5);
        assert!(!colors.contains(&Color::Green));
        assert!(!colors.contains(&Color::Blue));
        let deck = full_deck(2);
        assert!(!deck.contains(&Card::Color(Color::Green)));
        assert_eq!(deck.iter().filter(|c| c.is_wild()).count(), WILD_COUNT);
        assert_eq!(deck.iter().filter(|c| c.is_bonus()).count(), BONUS_COUNT);
    }
}
