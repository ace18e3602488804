use crate::action::TurnChoice;
use crate::bot::Bot;
use crate::card::Card;
use crate::state::GameView;

/// Takes a pile as soon as one would raise its score; otherwise draws.
///
/// Pile choices always maximize the immediate score gain, keeping the first
/// pile on ties.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyBot;

impl GreedyBot {
    pub fn new() -> Self {
        Self
    }
}

impl Bot for GreedyBot {
    fn choose_action(&mut self, view: &GameView) -> TurnChoice {
        if view.takeable.iter().any(|&pile| view.take_gain(pile) > 0) {
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

/// Pile with the largest gain if taken. Earlier piles win ties.
pub(crate) fn best_pile_to_take(view: &GameView, takeable: &[usize]) -> usize {
    first_max_by_gain(takeable, |pile| view.take_gain(pile))
}

/// Pile whose eventual take gains the most once `card` is on it. Earlier piles win ties.
pub(crate) fn best_pile_for_card(view: &GameView, card: Card, drawable: &[usize]) -> usize {
    first_max_by_gain(drawable, |pile| view.placement_gain(pile, card))
}

fn first_max_by_gain(piles: &[usize], gain: impl Fn(usize) -> i32) -> usize {
    let mut best: Option<(usize, i32)> = None;
    for &pile in piles {
        let value = gain(pile);
        if best.is_none_or(|(_, top)| value > top) {
            best = Some((pile, value));
        }
    }
    best.map(|(pile, _)| pile).unwrap_or_default()
}
