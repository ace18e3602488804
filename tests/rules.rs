use polychrome::action::{Action, TurnChoice};
use polychrome::card::{self, Card, Color};
use polychrome::{Bot, Game, GameBuilder, GameError, GameEvent, GameStatus, InvalidAction, Prompt, RandomBot};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// `filler` bonus cards followed by one card of every color in play, so the
/// deal always finds its starting colors at the back of the deck.
fn bonus_deck(num_players: usize, filler: usize) -> Vec<Card> {
    let mut deck = vec![Card::Bonus; filler];
    deck.extend(card::active_colors(num_players).iter().map(|c| Card::Color(*c)));
    deck
}

fn names(count: usize) -> Vec<String> {
    ["Ann", "Bob", "Cid", "Dee", "Eve"][..count]
        .iter()
        .map(|name| name.to_string())
        .collect()
}

fn assert_conserved(game: &Game) {
    assert_eq!(game.cards_in_play(), game.total_cards());
}

/// Applies `action` for whoever is prompted and checks card conservation.
fn act(game: &mut Game, action: Action) -> Result<(), GameError> {
    let player = game.prompt().player().ok_or(GameError::GameOver)?;
    game.apply(player, action)?;
    assert_conserved(game);
    Ok(())
}

fn draw_onto(game: &mut Game, pile: usize) -> Result<(), GameError> {
    if matches!(game.prompt(), Prompt::ChooseAction { .. }) {
        act(game, Action::Choose(TurnChoice::Draw))?;
    }
    act(game, Action::PlaceCard(pile))
}

#[test]
fn initial_setup_standard_mode() -> Result<(), GameError> {
    let game = GameBuilder::new(names(4))?.with_seed(3).build()?;
    let view = game.state_view(0)?;
    assert_eq!(game.total_cards(), 7 * 9 + 13);
    assert_eq!(game.deck_len(), game.total_cards() - 4);
    assert_eq!(view.piles.len(), 4);
    assert!(view.piles.iter().all(|pile| pile.capacity == 3));

    let mut dealt: Vec<Card> = view.players.iter().flat_map(|p| p.hand.clone()).collect();
    assert!(view.players.iter().all(|p| p.hand.len() == 1));
    dealt.sort();
    dealt.dedup();
    assert_eq!(dealt.len(), 4);
    assert_conserved(&game);
    Ok(())
}

#[test]
fn initial_setup_three_players_drops_one_color() -> Result<(), GameError> {
    let game = GameBuilder::new(names(3))?.build()?;
    assert_eq!(game.total_cards(), 6 * 9 + 13);
    assert_eq!(game.deck_len(), 6 * 9 + 13 - 3);
    assert_eq!(game.settings().colors.len(), 6);
    assert!(!game.settings().colors.contains(&Color::Green));
    Ok(())
}

#[test]
fn initial_setup_two_players() -> Result<(), GameError> {
    let game = GameBuilder::new(names(2))?.with_seed(11).build()?;
    let view = game.state_view(1)?;
    assert_eq!(game.total_cards(), 5 * 9 + 13);
    assert_eq!(game.deck_len(), 5 * 9 + 13 - 4);
    let capacities: Vec<usize> = view.piles.iter().map(|pile| pile.capacity).collect();
    assert_eq!(capacities, vec![1, 2, 3]);

    let mut dealt: Vec<Card> = view.players.iter().flat_map(|p| p.hand.clone()).collect();
    assert!(view.players.iter().all(|p| p.hand.len() == 2));
    dealt.sort();
    dealt.dedup();
    assert_eq!(dealt.len(), 4);
    for card in &dealt {
        let color = card.color().expect("starting cards are colored");
        assert!(game.settings().colors.contains(&color));
    }
    Ok(())
}

#[test]
fn rejects_bad_configurations() {
    assert!(matches!(
        GameBuilder::new(names(1)),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        GameBuilder::new(vec!["a", "b", "c", "d", "e", "f"]),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        GameBuilder::new(vec!["Ann", "Ann"]),
        Err(GameError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        GameBuilder::new(vec!["Ann", " "]),
        Err(GameError::InvalidConfiguration(_))
    ));
}

#[test]
fn injected_deck_missing_start_color_is_rejected() -> Result<(), GameError> {
    let result = GameBuilder::new(names(3))?
        .with_deck(vec![Card::Bonus; 20])
        .build();
    assert!(matches!(result, Err(GameError::InvalidConfiguration(_))));
    Ok(())
}

#[test]
fn first_turn_is_a_forced_draw() -> Result<(), GameError> {
    let mut game = GameBuilder::new(names(3))?
        .with_deck(bonus_deck(3, 30))
        .build()?;
    let deck_before = game.deck_len();
    assert_eq!(
        game.prompt(),
        Prompt::ChoosePlacement {
            player: 0,
            card: Card::Bonus,
            piles: vec![0, 1, 2],
        }
    );

    assert!(matches!(
        game.apply(1, Action::PlaceCard(0)),
        Err(GameError::NotPlayersTurn)
    ));
    assert!(matches!(
        game.apply(7, Action::PlaceCard(0)),
        Err(GameError::InvalidPlayer(7))
    ));
    assert!(matches!(
        game.apply(0, Action::TakePile(0)),
        Err(GameError::InvalidAction(InvalidAction::UnexpectedAction))
    ));
    assert!(matches!(
        game.apply(0, Action::PlaceCard(9)),
        Err(GameError::InvalidAction(InvalidAction::PileIndex(9)))
    ));
    assert_eq!(game.deck_len(), deck_before);
    assert_eq!(game.piles().card_count(), 0);

    game.apply(0, Action::PlaceCard(1))?;
    assert_eq!(game.deck_len(), deck_before - 1);
    assert_eq!(game.piles().get(1).map(|p| p.cards.len()), Some(1));
    assert_eq!(game.prompt(), Prompt::ChooseAction { player: 1 });
    assert_conserved(&game);
    Ok(())
}

#[test]
fn full_piles_force_a_take() -> Result<(), GameError> {
    let mut game = GameBuilder::new(names(3))?
        .with_deck(bonus_deck(3, 30))
        .build()?;
    for turn in 0..9 {
        draw_onto(&mut game, turn % 3)?;
    }
    assert_eq!(game.deck_len(), 24);
    assert_eq!(
        game.prompt(),
        Prompt::ChooseTake {
            player: 0,
            piles: vec![0, 1, 2],
        }
    );
    assert!(game.events().contains(&GameEvent::PilesFull));
    assert!(matches!(
        game.apply(0, Action::Choose(TurnChoice::Draw)),
        Err(GameError::InvalidAction(InvalidAction::UnexpectedAction))
    ));
    Ok(())
}

#[test]
fn placing_on_a_full_pile_is_rejected() -> Result<(), GameError> {
    let mut game = GameBuilder::new(names(2))?
        .with_deck(bonus_deck(2, 30))
        .build()?;
    act(&mut game, Action::PlaceCard(0))?;
    act(&mut game, Action::Choose(TurnChoice::Draw))?;
    let prompt = game.prompt();
    assert_eq!(
        prompt,
        Prompt::ChoosePlacement {
            player: 1,
            card: Card::Bonus,
            piles: vec![1, 2],
        }
    );
    assert!(matches!(
        game.apply(1, Action::PlaceCard(0)),
        Err(GameError::InvalidAction(InvalidAction::NotDrawable(0)))
    ));
    assert_eq!(game.prompt(), prompt);
    Ok(())
}

#[test]
fn two_player_game_plays_out_to_the_last_round() -> Result<(), GameError> {
    let mut game = GameBuilder::new(names(2))?
        .with_deck(bonus_deck(2, 20))
        .build()?;
    assert_eq!(game.deck_len(), 21);

    // Round 1: six placements fill piles of capacity 1, 2 and 3.
    for pile in [0, 1, 1, 2, 2, 2] {
        draw_onto(&mut game, pile)?;
    }
    assert_eq!(game.deck_len(), 15);
    assert!(!game.is_last_round());
    assert_eq!(
        game.prompt(),
        Prompt::ChooseTake {
            player: 0,
            piles: vec![0, 1, 2],
        }
    );
    act(&mut game, Action::TakePile(2))?;
    assert_eq!(game.is_out(0), Some(true));
    assert_eq!(
        game.prompt(),
        Prompt::ChooseTake {
            player: 1,
            piles: vec![0, 1],
        }
    );
    act(&mut game, Action::TakePile(0))?;

    // Round 2 opens with the player who took last.
    assert_eq!(game.round(), 2);
    assert_eq!(game.piles().card_count(), 0);
    assert!(matches!(game.prompt(), Prompt::ChoosePlacement { player: 1, .. }));
    act(&mut game, Action::PlaceCard(0))?;
    assert!(game.is_last_round());

    assert_eq!(game.prompt(), Prompt::ChooseAction { player: 0 });
    act(&mut game, Action::Choose(TurnChoice::Take))?;
    assert_eq!(
        game.prompt(),
        Prompt::ChooseTake {
            player: 0,
            piles: vec![0],
        }
    );
    act(&mut game, Action::TakePile(0))?;

    // Only taken or empty piles remain, so the next draw is forced.
    assert!(matches!(game.prompt(), Prompt::ChoosePlacement { player: 1, .. }));
    act(&mut game, Action::PlaceCard(2))?;
    assert_eq!(game.prompt(), Prompt::ChooseAction { player: 1 });
    act(&mut game, Action::Choose(TurnChoice::Take))?;
    act(&mut game, Action::TakePile(2))?;

    assert_eq!(game.status(), GameStatus::Finished { winner: 0 });
    assert_eq!(game.prompt(), Prompt::GameOver);
    assert_eq!(game.scores(), vec![2 + 4 * 2, 2 + 2 * 2]);
    let last_round_marks = game
        .events()
        .iter()
        .filter(|event| **event == GameEvent::LastRound)
        .count();
    assert_eq!(last_round_marks, 1);
    assert!(matches!(
        game.apply(0, Action::Choose(TurnChoice::Draw)),
        Err(GameError::GameOver)
    ));
    Ok(())
}

#[test]
fn empty_deck_forces_takes_then_ends_the_game() -> Result<(), GameError> {
    let mut game = GameBuilder::new(names(2))?
        .with_deck(bonus_deck(2, 0))
        .build()?;
    assert_eq!(game.deck_len(), 1);
    act(&mut game, Action::PlaceCard(0))?;
    assert_eq!(game.deck_len(), 0);
    assert!(game.is_last_round());

    assert_eq!(
        game.prompt(),
        Prompt::ChooseTake {
            player: 1,
            piles: vec![0],
        }
    );
    assert!(game.events().contains(&GameEvent::DeckEmpty));
    act(&mut game, Action::TakePile(0))?;

    // Nothing left to draw or take: the round closes and the game is over.
    assert!(game.is_finished());
    assert_eq!(game.winner(), Some(1));
    assert_eq!(game.hand(0).map(<[Card]>::len), Some(2));
    assert_eq!(game.hand(1).map(<[Card]>::len), Some(3));
    Ok(())
}

#[test]
fn seeded_random_games_keep_every_invariant() -> Result<(), GameError> {
    for (players, seed) in [(2, 1_u64), (2, 99), (3, 7), (4, 12), (5, 2024)] {
        let mut game = GameBuilder::new(names(players))?.with_seed(seed).build()?;
        let mut bots: Vec<RandomBot<StdRng>> = (0..players)
            .map(|index| RandomBot::new(StdRng::seed_from_u64(seed + index as u64)))
            .collect();
        let mut latched = false;
        let mut steps = 0;

        loop {
            let prompt = game.prompt();
            let Some(player) = prompt.player() else {
                break;
            };
            let view = game.state_view(player)?;
            let bot = &mut bots[player];
            let action = match prompt {
                Prompt::ChooseAction { .. } => Action::Choose(bot.choose_action(&view)),
                Prompt::ChooseTake { piles, .. } => {
                    Action::TakePile(bot.choose_pile_to_take(&view, &piles))
                }
                Prompt::ChoosePlacement { card, piles, .. } => {
                    assert_eq!(game.deck().next(), Some(&card));
                    Action::PlaceCard(bot.choose_pile_for_draw(&view, card, &piles))
                }
                Prompt::GameOver => break,
            };
            game.apply(player, action)?;
            assert_conserved(&game);

            for (index, pile) in game.piles().iter().enumerate() {
                assert!(pile.cards.len() <= game.piles().capacity(index));
            }
            if latched {
                assert!(game.is_last_round());
            }
            latched = game.is_last_round();
            steps += 1;
            assert!(steps < 10_000, "game did not terminate");
        }

        let scores = game.scores();
        let best = scores.iter().copied().max().unwrap_or_default();
        assert_eq!(game.winner(), scores.iter().position(|score| *score == best));
        assert!(game.deck_len() < card::LAST_ROUND_THRESHOLD);
        let rounds = game
            .events()
            .iter()
            .filter(|event| matches!(event, GameEvent::RoundStarted { .. }))
            .count();
        assert_eq!(rounds, game.round());
    }
    Ok(())
}

#[test]
fn same_seed_replays_the_same_game() -> Result<(), GameError> {
    let play = |seed: u64| -> Result<(Vec<i32>, usize, String), GameError> {
        let mut game = Game::builder(names(3))?.with_seed(seed).build()?;
        let mut bots: Vec<Box<dyn Bot>> = (0..3)
            .map(|index| {
                Box::new(RandomBot::new(StdRng::seed_from_u64(seed ^ index))) as Box<dyn Bot>
            })
            .collect();
        game.play_to_completion(&mut bots)?;
        Ok((game.scores(), game.round(), game.flush_log()))
    };
    let first = play(42)?;
    let second = play(42)?;
    assert_eq!(first, second);
    assert!(first.2.contains("is the winner"));
    Ok(())
}

#[test]
fn driver_rejects_wrong_bot_count() -> Result<(), GameError> {
    let mut game = GameBuilder::new(names(2))?.build()?;
    let mut bots: Vec<Box<dyn Bot>> = vec![Box::new(polychrome::GreedyBot::new())];
    assert!(matches!(
        game.play_to_completion(&mut bots),
        Err(GameError::InvalidConfiguration(_))
    ));
    Ok(())
}
