use crate::action::TurnChoice;
use crate::bot::Bot;
use crate::bots::greedy::{best_pile_for_card, best_pile_to_take};
use crate::card::Card;
use crate::state::GameView;

/// Keeps drawing while any pile can accept a card, placing each card where
/// it helps the most; takes only when nothing is left to build on.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuilderBot;

impl BuilderBot {
    pub fn new() -> Self {
        Self
    }
}

impl Bot for BuilderBot {
    fn choose_action(&mut self, view: &GameView) -> TurnChoice {
        if view.drawable.is_empty() {
            TurnChoice::Take
        } else {
            TurnChoice::Draw
        }
    }

    fn choose_pile_to_take(&mut self, view: &GameView, takeable: &[usize]) -> usize {
        best_pile_to_take(view, takeable)
    }

    fn choose_pile_for_draw(&mut self, view: &GameView, card: Card, drawable: &[usize]) -> usize {
        best_pile_for_card(view, card, drawable)
    }
}
