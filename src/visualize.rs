use std::fmt::Write;

use crate::action::{Action, TurnChoice};
use crate::card::Card;
use crate::state::{GameStatus, GameView, Prompt};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_scores: bool,
    pub show_capacity: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_scores: true,
            show_capacity: true,
        }
    }
}

pub fn render_state(state: &GameView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Ongoing => format!("Round {}", state.round),
        GameStatus::Finished { winner } => {
            let name = state
                .players
                .get(winner)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            format!("Finished (winner: {name})")
        }
    };
    let _ = writeln!(
        out,
        "{status}{}",
        if state.last_round { "  -- last round --" } else { "" }
    );
    let _ = writeln!(out, "Deck: {} cards", state.deck_count);
    let _ = writeln!(out, "Piles:");
    for (idx, pile) in state.piles.iter().enumerate() {
        let contents = if pile.taken {
            String::from("[TAKEN]")
        } else if pile.cards.is_empty() {
            String::from("[-]")
        } else {
            format!("[{}]", format_cards(&pile.cards))
        };
        if options.show_capacity {
            let _ = writeln!(
                out,
                "  [{idx}] {}/{}  {contents}",
                pile.cards.len(),
                pile.capacity
            );
        } else {
            let _ = writeln!(out, "  [{idx}] {contents}");
        }
    }
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let label_you = if player.id == state.self_player {
            " (You)"
        } else {
            ""
        };
        let current_tag = if player.is_current { " <- current" } else { "" };
        let out_tag = if player.out { " [out]" } else { "" };
        if options.show_scores {
            let _ = writeln!(
                out,
                "  {}{label_you}{out_tag} - {} points{current_tag}",
                player.name, player.score
            );
        } else {
            let _ = writeln!(out, "  {}{label_you}{out_tag}{current_tag}", player.name);
        }
        let _ = writeln!(out, "    Hand: {}", summarize_hand(&player.hand));
    }
    out
}

/// One line per pending decision, e.g. for a human prompt header.
pub fn describe_prompt(state: &GameView, prompt: &Prompt) -> String {
    match prompt {
        Prompt::ChooseAction { .. } => String::from("Take a pile or draw a card"),
        Prompt::ChooseTake { piles, .. } => format!("Choose a pile to take: {piles:?}"),
        Prompt::ChoosePlacement { card, piles, .. } => {
            format!("You drew {card}; choose a pile for it: {piles:?}")
        }
        Prompt::GameOver => match state.status {
            GameStatus::Finished { .. } => String::from("Game over"),
            GameStatus::Ongoing => String::from("Waiting"),
        },
    }
}

pub fn describe_action(state: &GameView, action: &Action) -> String {
    match action {
        Action::Choose(TurnChoice::Take) => String::from("Take a pile"),
        Action::Choose(TurnChoice::Draw) => String::from("Draw a card"),
        Action::TakePile(pile) => {
            let cards = state.pile_cards(*pile);
            format!(
                "Take pile {pile} [{}] ({:+} points)",
                format_cards(cards),
                state.take_gain(*pile)
            )
        }
        Action::PlaceCard(pile) => format!("Place on pile {pile}"),
    }
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compact "3 blue, 1 wild" style summary with cards grouped in sorted order.
fn summarize_hand(hand: &[Card]) -> String {
    if hand.is_empty() {
        return String::from("(empty)");
    }
    let mut sorted = hand.to_vec();
    sorted.sort();
    let mut parts: Vec<String> = Vec::new();
    let mut iter = sorted.into_iter().peekable();
    while let Some(card) = iter.next() {
        let mut count = 1;
        while iter.peek() == Some(&card) {
            iter.next();
            count += 1;
        }
        parts.push(format!("{count} {card}"));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let game = GameBuilder::new(["Ann", "Bo"])
            .expect("builder")
            .build()
            .expect("game");
        let view = game.state_view(0).expect("state view");
        let text = render_state(&view);
        assert!(text.contains("Ann (You)"));
        assert!(text.contains("Hand: 1 "));
        assert!(text.contains("Round 1"));
        let prompt = game.prompt();
        assert!(describe_prompt(&view, &prompt).contains("choose a pile"));
        assert_eq!(
            describe_action(&view, &Action::Choose(TurnChoice::Draw)),
            "Draw a card"
        );
    }

    #[test]
    fn prompts_name_the_offered_piles() {
        let game = GameBuilder::new(["Ann", "Bo", "Cy"])
            .expect("builder")
            .build()
            .expect("game");
        let view = game.state_view(0).expect("state view");
        let take = Prompt::ChooseTake {
            player: 0,
            piles: vec![0, 2],
        };
        assert_eq!(describe_prompt(&view, &take), "Choose a pile to take: [0, 2]");
        let place = Prompt::ChoosePlacement {
            player: 0,
            card: Card::Wild,
            piles: vec![1],
        };
        assert_eq!(
            describe_prompt(&view, &place),
            "You drew wild; choose a pile for it: [1]"
        );
        let choose = Prompt::ChooseAction { player: 0 };
        assert_eq!(describe_prompt(&view, &choose), "Take a pile or draw a card");
    }

    #[test]
    fn hand_summary_groups_duplicates() {
        let hand = [Card::Bonus, Card::Wild, Card::Bonus];
        assert_eq!(summarize_hand(&hand), "1 wild, 2 +2");
    }
}
