use crate::action::TurnChoice;
use crate::card::Card;
use crate::state::GameView;

/// Interface for Polychrome players, automated or interactive.
///
/// Pile indices returned must come from the slice the engine offered;
/// anything else is rejected by [`Game::apply`](crate::Game::apply).
pub trait Bot {
    /// Free choice between taking a pile and drawing a card. Only asked when both are legal.
    fn choose_action(&mut self, view: &GameView) -> TurnChoice;

    fn choose_pile_to_take(&mut self, view: &GameView, takeable: &[usize]) -> usize;

    fn choose_pile_for_draw(&mut self, view: &GameView, card: Card, drawable: &[usize]) -> usize;

    fn on_game_end(&mut self, _view: &GameView) {}
}
