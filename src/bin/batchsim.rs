use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use plotters::prelude::*;
use tracing::{info, warn};

use polychrome::{BatchConfig, ScoringTable, SeatSpec, SeatSummary, run_batch};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(
    name = "batchsim",
    about = "Run many Polychrome games between bots and report per-seat win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 100)]
    games: usize,

    /// Base RNG seed (deck + bot RNGs will be derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Scoring table preset (scoring1 or scoring2)
    #[arg(long, default_value = "scoring1")]
    scoring: String,

    /// Write every game's log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Output chart file (png)
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Enable info logging (debug with -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Player bot specs: e.g., greedy builder random (2-5 total)
    #[arg(required = true)]
    bots: Vec<String>,
}

fn main() {
    let args = Args::parse();
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let scoring = ScoringTable::from_name(&args.scoring)?;
    let config = BatchConfig {
        seats: SeatSpec::numbered(args.bots.iter().cloned()),
        scoring,
        games: args.games,
        seed: args.seed,
        keep_logs: args.log_file.is_some(),
    };

    println!("#### Starting Batch Simulation ####");
    println!("Players are: {:?}", args.bots);
    println!("Scoring is: {}", config.scoring);

    let started = Instant::now();
    let summary = run_batch(&config)?;
    let elapsed = started.elapsed();
    info!(elapsed_ms = elapsed.as_millis() as u64, "simulation complete");

    if let Some(path) = &args.log_file {
        let mut text = String::new();
        for (index, record) in summary.games.iter().enumerate() {
            text.push_str(&format!(
                "\n>>>>>>> Starting Game #{}/{} <<<<<<<\n",
                index + 1,
                summary.games.len()
            ));
            text.push_str(&record.log);
        }
        if let Err(err) = fs::write(path, text) {
            warn!(path = %path.display(), error = %err, "could not write batch log");
        }
    }

    let games = summary.games.len();
    println!("\nResults over {games} games:");
    for seat in &summary.seats {
        println!(
            "  {:<10} {:<10} {:>5}/{games}  ({:.2}%)   avg score: {:>7.2}",
            seat.name,
            seat.label,
            seat.wins,
            seat.win_rate(games) * 100.0,
            seat.average_score(games)
        );
    }
    let rounds: usize = summary.games.iter().map(|g| g.rounds).sum();
    println!(
        "Average rounds per game: {:.2}  ({:.3} ms per game)",
        rounds as f64 / games as f64,
        elapsed.as_secs_f64() * 1000.0 / games as f64
    );

    if let Some(out) = &args.out {
        render_bar_chart(out, &summary.seats, games)?;
        println!("\nChart written to {}", out.display());
    }

    Ok(())
}

fn render_bar_chart(out: &PathBuf, seats: &[SeatSummary], games: usize) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = seats
        .iter()
        .map(|seat| format!("{} ({})", seat.name, seat.label))
        .collect();
    let values: Vec<f64> = seats.iter().map(|seat| seat.win_rate(games) * 100.0).collect();
    let max_value = values.iter().cloned().fold(0.0_f64, f64::max);

    let root = BitMapBackend::new(out, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Polychrome Win Rates (per seat)", ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..labels.len(), 0.0f64..max_value.max(10.0))
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .y_desc("Win rate (%)")
        .x_desc("Seat")
        .x_labels(labels.len())
        .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
        .y_label_formatter(&|v| format!("{v:.0}"))
        .light_line_style(&WHITE.mix(0.0))
        .draw()
        .map_err(|e| format!("{e}"))?;

    for (i, value) in values.iter().enumerate() {
        let rect = Rectangle::new([(i, 0.0), (i, *value)], BLUE.filled());
        chart
            .draw_series(std::iter::once(rect))
            .map_err(|e| format!("{e}"))?;
    }

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
