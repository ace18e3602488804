use rand::Rng;
use rand::seq::SliceRandom;

use crate::action::TurnChoice;
use crate::bot::Bot;
use crate::card::Card;
use crate::state::GameView;

/// Baseline bot that samples uniformly from whatever is legal.
pub struct RandomBot<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn pick(&mut self, piles: &[usize]) -> usize {
        piles.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn choose_action(&mut self, view: &GameView) -> TurnChoice {
        let mut legal = Vec::with_capacity(2);
        if !view.takeable.is_empty() {
            legal.push(TurnChoice::Take);
        }
        if !view.drawable.is_empty() && view.deck_count > 0 {
            legal.push(TurnChoice::Draw);
        }
        legal
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(TurnChoice::Take)
    }

    fn choose_pile_to_take(&mut self, _view: &GameView, takeable: &[usize]) -> usize {
        self.pick(takeable)
    }

    fn choose_pile_for_draw(&mut self, _view: &GameView, _card: Card, drawable: &[usize]) -> usize {
        self.pick(drawable)
    }
}
