use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;

use polychrome::bots::registry::{REGISTRY, create_bot_from_spec, label_for_spec};
use polychrome::{Bot, Game, LogMode, ScoringTable};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "play", about = "Play a game of Polychrome")]
struct Args {
    /// Take a seat as a human player
    #[arg(long)]
    play: bool,

    /// Bots to play against, e.g. `greedy builder random:7` (default: greedy random)
    #[arg(long = "set-ais", value_name = "AI", num_args = 1..)]
    ais: Vec<String>,

    /// Scoring table preset (scoring1 or scoring2)
    #[arg(long, default_value = "scoring1")]
    scoring: String,

    /// Seed for shuffling and random bots
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Append the game log to this file instead of printing it
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// List the available bots and exit
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.list {
        for entry in REGISTRY {
            println!("  {:<10} {}", entry.label, entry.about);
        }
        return Ok(());
    }

    let scoring = ScoringTable::from_name(&args.scoring)?;

    let mut specs: Vec<(String, String)> = Vec::new();
    if args.play {
        specs.push((String::from("human:Human"), String::from("Human")));
    }
    if args.ais.is_empty() {
        specs.push((String::from("greedy"), String::from("Greedy")));
        specs.push((String::from("random"), String::from("Random")));
    } else {
        for (index, spec) in args.ais.iter().enumerate() {
            if label_for_spec(spec) == "human" {
                return Err("use --play to add a human seat".into());
            }
            specs.push((spec.clone(), format!("Player {index}")));
        }
    }

    let log_mode = match (&args.log_file, args.play) {
        (Some(path), _) => LogMode::File(path.clone()),
        (None, true) => LogMode::Buffer,
        (None, false) => LogMode::Print,
    };

    let mut game = Game::builder(specs.iter().map(|(_, name)| name.clone()))?
        .with_seed(args.seed)
        .with_scoring(scoring)
        .with_log_mode(log_mode)
        .build()?;

    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(specs.len());
    for (index, (spec, _)) in specs.iter().enumerate() {
        bots.push(create_bot_from_spec(spec, index, args.seed)?);
    }

    info!(players = specs.len(), seed = args.seed, "starting game");
    game.play_to_completion(&mut bots)?;

    if let Some(winner) = game.winner() {
        let scores = game.scores();
        println!("\nFinal scores:");
        for (player, score) in scores.iter().enumerate() {
            println!("  {:<12} {score}", game.player_name(player).unwrap_or("?"));
        }
        println!(
            "Winner: {} after {} rounds.",
            game.player_name(winner).unwrap_or("?"),
            game.round()
        );
    }

    Ok(())
}
