use std::collections::{HashSet, VecDeque};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::action::{Action, PlayerId, TurnChoice};
use crate::bot::Bot;
use crate::card::{Card, Color, LAST_ROUND_THRESHOLD, full_deck};
use crate::error::{GameError, InvalidAction};
use crate::log::{GameEvent, GameLog, LogMode};
use crate::piles::Piles;
use crate::score::ScoringTable;
use crate::state::{
    GameSettings, GameStatus, GameView, PileView, PlayerPublicState, Prompt, TurnPhase,
};

const DEFAULT_SEED: u64 = 0x5EED_C010_5EED_C010;
/// Starting colors dealt in a two-player game, split evenly.
const TWO_PLAYER_START_COLORS: usize = 4;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub names: Vec<String>,
    pub seed: u64,
    pub scoring: ScoringTable,
    pub log_mode: LogMode,
}

impl GameConfig {
    pub fn new(names: Vec<String>, seed: u64) -> Result<Self, GameError> {
        GameSettings::new(names.len(), ScoringTable::default())?;
        let mut seen = HashSet::new();
        for name in &names {
            if name.trim().is_empty() {
                return Err(GameError::config("player names must not be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(GameError::config(format!("duplicate player name '{name}'")));
            }
        }
        Ok(Self {
            names,
            seed,
            scoring: ScoringTable::default(),
            log_mode: LogMode::default(),
        })
    }
}

/// Builder that enables deterministic deck injection for tests and experiments.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new<I, S>(names: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(Into::into).collect();
        Ok(Self {
            config: GameConfig::new(names, DEFAULT_SEED)?,
            deck: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringTable) -> Self {
        self.config.scoring = scoring;
        self
    }

    pub fn with_log_mode(mut self, mode: LogMode) -> Self {
        self.config.log_mode = mode;
        self
    }

    /// Use `deck` (front first) instead of a shuffled standard deck. Injected
    /// decks are never shuffled; starting colors are still sampled from the seed.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Core Polychrome game engine.
///
/// The engine never calls into a strategy. Callers read [`Game::prompt`] and
/// answer with [`Game::apply`]; [`Game::play_to_completion`] does this for a
/// set of [`Bot`]s.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    phase: TurnPhase,
    players: Vec<PlayerState>,
    piles: Piles,
    deck: VecDeque<Card>,
    total_cards: usize,
    /// Last selected player; the next turn goes to the first player after it who is not out.
    cursor: PlayerId,
    round: usize,
    last_round: bool,
    log: GameLog,
}

impl Game {
    pub fn builder<I, S>(names: I) -> Result<GameBuilder, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GameBuilder::new(names)
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerId {
        self.cursor
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn is_last_round(&self) -> bool {
        self.last_round
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn deck(&self) -> impl Iterator<Item = &Card> {
        self.deck.iter()
    }

    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    pub fn player_name(&self, player: PlayerId) -> Option<&str> {
        self.players.get(player).map(|p| p.name.as_str())
    }

    pub fn hand(&self, player: PlayerId) -> Option<&[Card]> {
        self.players.get(player).map(|p| p.hand.as_slice())
    }

    pub fn is_out(&self, player: PlayerId) -> Option<bool> {
        self.players.get(player).map(|p| p.out)
    }

    /// Size of the deck before the deal; constant for the whole game.
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Cards currently in the deck, on the piles and in every hand.
    pub fn cards_in_play(&self) -> usize {
        self.deck.len()
            + self.piles.card_count()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::Ongoing => None,
        }
    }

    /// Current score of every hand, in seat order.
    pub fn scores(&self) -> Vec<i32> {
        let scorer = self.settings.scorer();
        self.players.iter().map(|p| scorer.score(&p.hand)).collect()
    }

    pub fn events(&self) -> &[GameEvent] {
        self.log.events()
    }

    /// Returns the buffered log text and clears it.
    pub fn flush_log(&mut self) -> String {
        self.log.flush()
    }

    pub fn prompt(&self) -> Prompt {
        let player = self.cursor;
        match self.phase {
            TurnPhase::AwaitingAction => Prompt::ChooseAction { player },
            TurnPhase::AwaitingTake => Prompt::ChooseTake {
                player,
                piles: self.piles.takeable(),
            },
            TurnPhase::AwaitingPlacement { card } => Prompt::ChoosePlacement {
                player,
                card,
                piles: self.piles.drawable(),
            },
            TurnPhase::GameOver => Prompt::GameOver,
        }
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameView, GameError> {
        if perspective >= self.players.len() {
            return Err(GameError::InvalidPlayer(perspective));
        }
        let scorer = self.settings.scorer();
        let piles = self
            .piles
            .iter()
            .enumerate()
            .map(|(index, pile)| PileView {
                cards: pile.cards.clone(),
                taken: pile.taken,
                capacity: self.piles.capacity(index),
            })
            .collect();
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| PlayerPublicState {
                id: idx,
                name: player.name.clone(),
                hand: player.hand.clone(),
                out: player.out,
                score: scorer.score(&player.hand),
                is_current: idx == self.cursor,
            })
            .collect();

        Ok(GameView {
            settings: self.settings.clone(),
            phase: self.phase,
            status: self.status,
            self_player: perspective,
            current_player: self.cursor,
            round: self.round,
            last_round: self.last_round,
            deck_count: self.deck.len(),
            piles,
            takeable: self.piles.takeable(),
            drawable: self.piles.drawable(),
            players,
            hand: self.players[perspective].hand.clone(),
        })
    }

    /// Answers the pending [`Prompt`]. Rejected actions leave the game untouched.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<(), GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.cursor {
            return Err(GameError::NotPlayersTurn);
        }

        match (self.phase, action) {
            (TurnPhase::AwaitingAction, Action::Choose(TurnChoice::Take)) => {
                if self.piles.takeable().is_empty() {
                    return Err(InvalidAction::CannotTake.into());
                }
                self.phase = TurnPhase::AwaitingTake;
            }
            (TurnPhase::AwaitingAction, Action::Choose(TurnChoice::Draw)) => {
                if self.piles.drawable().is_empty() {
                    return Err(InvalidAction::CannotDraw.into());
                }
                let card = self.reveal().ok_or(InvalidAction::CannotDraw)?;
                self.phase = TurnPhase::AwaitingPlacement { card };
            }
            (TurnPhase::AwaitingTake, Action::TakePile(pile)) => {
                let cards = self.piles.take(pile)?;
                let taker = &mut self.players[player];
                taker.hand.extend(cards);
                taker.out = true;
                let name = taker.name.clone();
                self.log.record(GameEvent::Took { name, pile });
                self.after_action()?;
            }
            (TurnPhase::AwaitingPlacement { card }, Action::PlaceCard(pile)) => {
                self.piles.place(pile, card)?;
                self.deck.pop_front();
                self.log.record(GameEvent::Placed { pile });
                self.after_action()?;
            }
            _ => return Err(InvalidAction::UnexpectedAction.into()),
        }

        Ok(())
    }

    /// Drives the game to the end, routing every prompt to the matching bot.
    ///
    /// `bots[i]` plays seat `i`. Each bot receives `on_game_end` once the game is over.
    pub fn play_to_completion(&mut self, bots: &mut [Box<dyn Bot>]) -> Result<(), GameError> {
        if bots.len() != self.players.len() {
            return Err(GameError::config(format!(
                "expected {} bots, received {}",
                self.players.len(),
                bots.len()
            )));
        }
        loop {
            let prompt = self.prompt();
            let Some(player) = prompt.player() else {
                break;
            };
            let view = self.state_view(player)?;
            let bot = &mut bots[player];
            let action = match prompt {
                Prompt::ChooseAction { .. } => Action::Choose(bot.choose_action(&view)),
                Prompt::ChooseTake { piles, .. } => {
                    Action::TakePile(bot.choose_pile_to_take(&view, &piles))
                }
                Prompt::ChoosePlacement { card, piles, .. } => {
                    Action::PlaceCard(bot.choose_pile_for_draw(&view, card, &piles))
                }
                Prompt::GameOver => break,
            };
            self.apply(player, action)?;
        }
        for (player, bot) in bots.iter_mut().enumerate() {
            let view = self.state_view(player)?;
            bot.on_game_end(&view);
        }
        Ok(())
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        let settings = GameSettings::new(config.names.len(), config.scoring)?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let shuffle = deck.is_none();
        let mut deck = deck.unwrap_or_else(|| {
            let mut deck = full_deck(settings.num_players);
            deck.shuffle(&mut rng);
            deck
        });
        let total_cards = deck.len();

        let mut players: Vec<PlayerState> =
            config.names.into_iter().map(PlayerState::new).collect();
        let start_colors: Vec<Color> = if settings.is_two_player() {
            settings
                .colors
                .choose_multiple(&mut rng, TWO_PLAYER_START_COLORS)
                .copied()
                .collect()
        } else {
            settings
                .colors
                .choose_multiple(&mut rng, players.len())
                .copied()
                .collect()
        };
        let per_player = start_colors.len() / players.len();
        for (index, color) in start_colors.into_iter().enumerate() {
            let card = Card::Color(color);
            let position = deck.iter().position(|c| *c == card).ok_or_else(|| {
                GameError::config(format!("deck has no {color} card left to deal"))
            })?;
            deck.remove(position);
            players[index / per_player].hand.push(card);
        }
        if shuffle {
            deck.shuffle(&mut rng);
        }

        debug!(
            players = players.len(),
            seed = config.seed,
            deck = deck.len(),
            "starting game"
        );

        let cursor = players.len() - 1;
        let mut game = Game {
            piles: Piles::new(settings.pile_mode),
            settings,
            status: GameStatus::Ongoing,
            phase: TurnPhase::AwaitingAction,
            players,
            deck: deck.into(),
            total_cards,
            cursor,
            round: 0,
            last_round: false,
            log: GameLog::new(config.log_mode),
        };

        game.start_round()?;
        Ok(game)
    }

    fn start_round(&mut self) -> Result<(), GameError> {
        self.round += 1;
        self.log.record(GameEvent::RoundStarted { round: self.round });
        self.piles.reset();
        for player in &mut self.players {
            player.out = false;
        }
        for player in 0..self.players.len() {
            self.log_status(player);
        }
        self.begin_turn()
    }

    fn begin_turn(&mut self) -> Result<(), GameError> {
        let n = self.players.len();
        loop {
            self.cursor = (self.cursor + 1) % n;
            if !self.players[self.cursor].out {
                break;
            }
        }
        self.log.record(GameEvent::TurnStarted {
            name: self.players[self.cursor].name.clone(),
        });
        self.log.record(GameEvent::PileContents {
            piles: self.piles.iter().cloned().collect(),
        });

        if self.piles.all_empty() {
            let Some(card) = self.deck.front().copied() else {
                return self.close_exhausted_round();
            };
            self.log.record(GameEvent::ForcedDraw);
            self.log.record(GameEvent::Drew { card });
            self.phase = TurnPhase::AwaitingPlacement { card };
        } else if self.piles.all_full() {
            self.log.record(GameEvent::PilesFull);
            self.phase = TurnPhase::AwaitingTake;
        } else if self.deck.is_empty() {
            self.log.record(GameEvent::DeckEmpty);
            self.phase = TurnPhase::AwaitingTake;
        } else {
            self.phase = TurnPhase::AwaitingAction;
        }
        Ok(())
    }

    /// Looks at the front deck card. It stays in the deck until it is placed.
    fn reveal(&mut self) -> Option<Card> {
        let card = self.deck.front().copied()?;
        self.log.record(GameEvent::Drew { card });
        Some(card)
    }

    fn after_action(&mut self) -> Result<(), GameError> {
        let count = self.deck.len();
        self.log.record(GameEvent::CardsLeft { count });
        if count < LAST_ROUND_THRESHOLD {
            self.latch_last_round();
        }

        if self.players.iter().all(|p| p.out) {
            self.end_round()
        } else {
            self.begin_turn()
        }
    }

    /// Nothing left to draw or take: everyone still in goes out empty-handed
    /// and the game ends with this round.
    fn close_exhausted_round(&mut self) -> Result<(), GameError> {
        self.log.record(GameEvent::DeckEmpty);
        for player in &mut self.players {
            player.out = true;
        }
        self.latch_last_round();
        self.end_round()
    }

    fn latch_last_round(&mut self) {
        if !self.last_round {
            self.log.record(GameEvent::LastRound);
            self.last_round = true;
        }
    }

    fn end_round(&mut self) -> Result<(), GameError> {
        // Step back so the next selection lands on the player who just went out.
        let n = self.players.len();
        self.cursor = (self.cursor + n - 1) % n;
        if self.last_round {
            self.finish();
            Ok(())
        } else {
            self.start_round()
        }
    }

    fn finish(&mut self) {
        self.log.record(GameEvent::GameOver);
        let scores = self.scores();
        for player in 0..self.players.len() {
            self.players[player].out = false;
            self.log_status(player);
        }
        self.log.record(GameEvent::RemainingDeck {
            cards: self.deck.iter().copied().collect(),
        });

        let mut winner = 0;
        for (index, score) in scores.iter().enumerate() {
            if *score > scores[winner] {
                winner = index;
            }
        }
        self.log.record(GameEvent::Winner {
            name: self.players[winner].name.clone(),
        });
        debug!(winner, ?scores, rounds = self.round, "game finished");
        self.status = GameStatus::Finished { winner };
        self.phase = TurnPhase::GameOver;
    }

    fn log_status(&mut self, player: PlayerId) {
        let state = &self.players[player];
        let score = self.settings.scorer().score(&state.hand);
        let counts: Vec<(Card, usize)> = self
            .settings
            .colors
            .iter()
            .map(|color| Card::Color(*color))
            .chain([Card::Wild, Card::Bonus])
            .map(|card| (card, state.hand.iter().filter(|c| **c == card).count()))
            .collect();
        self.log.record(GameEvent::PlayerStatus {
            name: state.name.clone(),
            score,
            counts,
        });
    }
}

/// Private per-seat state. Every game builds fresh values.
#[derive(Clone, Debug)]
struct PlayerState {
    name: String,
    hand: Vec<Card>,
    out: bool,
}

impl PlayerState {
    fn new(name: String) -> Self {
        Self {
            name,
            hand: Vec::new(),
            out: false,
        }
    }
}
