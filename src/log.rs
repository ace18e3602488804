//! Human-readable game log.
//!
//! The engine records typed [`GameEvent`]s; the [`GameLog`] keeps them and
//! renders each one as text into the configured sink.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::card::Card;
use crate::piles::Pile;

/// Something that happened during a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: usize },
    PlayerStatus { name: String, score: i32, counts: Vec<(Card, usize)> },
    TurnStarted { name: String },
    PileContents { piles: Vec<Pile> },
    ForcedDraw,
    PilesFull,
    DeckEmpty,
    Drew { card: Card },
    Placed { pile: usize },
    Took { name: String, pile: usize },
    CardsLeft { count: usize },
    LastRound,
    GameOver,
    RemainingDeck { cards: Vec<Card> },
    Winner { name: String },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::RoundStarted { round } => write!(f, "\n----Round {round}----"),
            GameEvent::PlayerStatus { name, score, counts } => {
                write!(f, "{name}:\t{score} points")?;
                for (i, (card, count)) in counts.iter().enumerate() {
                    let sep = if i % 3 == 0 { "\n    " } else { "\t" };
                    write!(f, "{sep}{card}: {count}")?;
                }
                Ok(())
            }
            GameEvent::TurnStarted { name } => write!(f, "\nIt's {name}'s turn"),
            GameEvent::PileContents { piles } => {
                write!(f, "Pile contents:")?;
                for (index, pile) in piles.iter().enumerate() {
                    if pile.taken {
                        write!(f, " {index}:[TAKEN]")?;
                    } else {
                        write!(f, " {index}:[{}]", join_cards(&pile.cards))?;
                    }
                }
                Ok(())
            }
            GameEvent::ForcedDraw => f.write_str("All piles are empty, draw a card"),
            GameEvent::PilesFull => f.write_str("All available piles are full"),
            GameEvent::DeckEmpty => f.write_str("The deck is empty"),
            GameEvent::Drew { card } => write!(f, "Drew a {card}"),
            GameEvent::Placed { pile } => write!(f, "Placed on pile {pile}"),
            GameEvent::Took { name, pile } => write!(f, "{name} takes pile {pile}"),
            GameEvent::CardsLeft { count } => write!(f, "Cards left: {count}"),
            GameEvent::LastRound => f.write_str("Last Round!"),
            GameEvent::GameOver => f.write_str("\n----Game Over----"),
            GameEvent::RemainingDeck { cards } => {
                write!(f, "Remaining cards: [{}]", join_cards(cards))
            }
            GameEvent::Winner { name } => write!(f, "{name} is the winner"),
        }
    }
}

fn join_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where rendered log lines go.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LogMode {
    /// Keep lines in memory until [`GameLog::flush`].
    #[default]
    Buffer,
    /// Write lines to stdout.
    Print,
    /// Append lines to a file.
    File(PathBuf),
}

/// Event history plus the text sink for one game.
#[derive(Debug, Default)]
pub struct GameLog {
    mode: LogMode,
    buffer: String,
    events: Vec<GameEvent>,
    file: Option<File>,
}

impl GameLog {
    pub fn new(mode: LogMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> &LogMode {
        &self.mode
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Returns the buffered text and clears the buffer.
    pub fn flush(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    pub fn record(&mut self, event: GameEvent) {
        let line = event.to_string();
        debug!(target: "polychrome::game", "{}", line.trim_start());
        self.write_line(&line);
        self.events.push(event);
    }

    fn write_line(&mut self, line: &str) {
        if let LogMode::File(path) = &self.mode {
            let path = path.clone();
            match self.append_to_file(&path, line) {
                Ok(()) => return,
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "could not write game log to file, printing to stdout instead"
                    );
                    self.mode = LogMode::Print;
                    self.file = None;
                }
            }
        }
        match self.mode {
            LogMode::Buffer => {
                self.buffer.push_str(line);
                self.buffer.push('\n');
            }
            LogMode::Print | LogMode::File(_) => println!("{line}"),
        }
    }

    fn append_to_file(&mut self, path: &Path, line: &str) -> std::io::Result<()> {
        if self.file.is_none() {
            self.file = Some(OpenOptions::new().create(true).append(true).open(path)?);
        }
        match self.file.as_mut() {
            Some(file) => writeln!(file, "{line}"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_mode_collects_lines_until_flushed() {
        let mut log = GameLog::new(LogMode::Buffer);
        log.record(GameEvent::RoundStarted { round: 1 });
        log.record(GameEvent::CardsLeft { count: 40 });
        let text = log.flush();
        assert_eq!(text, "\n----Round 1----\nCards left: 40\n");
        assert!(log.flush().is_empty());
        assert_eq!(log.events().len(), 2);
    }

    #[test]
    fn unwritable_file_falls_back_to_stdout() {
        let path = PathBuf::from("/nonexistent-polychrome-dir/game.log");
        let mut log = GameLog::new(LogMode::File(path));
        log.record(GameEvent::LastRound);
        assert_eq!(log.mode(), &LogMode::Print);
        assert_eq!(log.events(), &[GameEvent::LastRound]);
    }

    #[test]
    fn taken_piles_render_as_taken() {
        let event = GameEvent::PileContents {
            piles: vec![
                Pile { cards: vec![Card::Wild, Card::Bonus], taken: false },
                Pile { cards: Vec::new(), taken: true },
            ],
        };
        assert_eq!(event.to_string(), "Pile contents: 0:[wild, +2] 1:[TAKEN]");
    }
}
