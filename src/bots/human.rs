use std::io::{self, Write};

use crate::action::{Action, TurnChoice};
use crate::bot::Bot;
use crate::card::Card;
use crate::state::{GameView, Prompt};
use crate::visualize::{describe_action, describe_prompt, render_state};

/// Interactive bot that queries a human via standard input.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Shows the table, then reads lines until one names an entry of `options`.
    fn ask(&self, view: &GameView, header: &str, options: &[Action]) -> Action {
        loop {
            println!("\n=== {}'s turn ===", self.name);
            println!("{}", render_state(view));
            println!("{header}");
            for (index, action) in options.iter().enumerate() {
                println!("  [{index}] {}", describe_action(view, action));
            }
            println!("Type the option index, 'help' or 'q' to quit.");
            print!("Selection: ");
            if io::stdout().flush().is_err() {
                eprintln!("failed to flush stdout");
            }
            let mut input = String::new();
            match io::stdin().read_line(&mut input) {
                Ok(0) => {
                    println!("Input closed. Exiting game.");
                    std::process::exit(0);
                }
                Ok(_) => {}
                Err(_) => {
                    eprintln!("failed to read input");
                    continue;
                }
            }
            let trimmed = input.trim();
            if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                println!("Exiting game at user's request.");
                std::process::exit(0);
            }
            if trimmed.eq_ignore_ascii_case("help") {
                println!("Taking a pile ends your round; drawing places the top deck card on a pile.");
                println!("Your score counts your best three colors and subtracts the rest.");
                continue;
            }
            let Ok(choice) = trimmed.parse::<usize>() else {
                println!("Invalid input: '{trimmed}'. Please enter a number.");
                continue;
            };
            if let Some(action) = options.get(choice) {
                return *action;
            }
            println!("Index out of range. Please choose a valid option.");
        }
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl Bot for HumanBot {
    fn choose_action(&mut self, view: &GameView) -> TurnChoice {
        let options = [
            Action::Choose(TurnChoice::Draw),
            Action::Choose(TurnChoice::Take),
        ];
        let prompt = Prompt::ChooseAction {
            player: view.self_player,
        };
        match self.ask(view, &describe_prompt(view, &prompt), &options) {
            Action::Choose(choice) => choice,
            _ => TurnChoice::Draw,
        }
    }

    fn choose_pile_to_take(&mut self, view: &GameView, takeable: &[usize]) -> usize {
        let options: Vec<Action> = takeable.iter().map(|&pile| Action::TakePile(pile)).collect();
        let prompt = Prompt::ChooseTake {
            player: view.self_player,
            piles: takeable.to_vec(),
        };
        self.ask(view, &describe_prompt(view, &prompt), &options)
            .pile()
            .unwrap_or_default()
    }

    fn choose_pile_for_draw(&mut self, view: &GameView, card: Card, drawable: &[usize]) -> usize {
        let options: Vec<Action> = drawable.iter().map(|&pile| Action::PlaceCard(pile)).collect();
        let prompt = Prompt::ChoosePlacement {
            player: view.self_player,
            card,
            piles: drawable.to_vec(),
        };
        self.ask(view, &describe_prompt(view, &prompt), &options)
            .pile()
            .unwrap_or_default()
    }

    fn on_game_end(&mut self, view: &GameView) {
        println!("\n=== Final table ===");
        println!("{}", render_state(view));
    }
}
