//! Microreef - headless runner
//!
//! Loads a simulation file, advances it a number of ticks, then optionally
//! saves the result and/or prints a JSON snapshot.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use microreef::{SimParams, Simulation};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulation file to load
    file: PathBuf,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 0)]
    ticks: u64,

    /// Write the final state to this file
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Enable random algae births
    #[arg(short, long)]
    birth: bool,

    /// JSON file overriding simulation parameters
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Print the final state as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let params = match &args.params {
        Some(path) => match SimParams::from_json_file(path) {
            Ok(params) => params,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => SimParams::default(),
    };

    let mut sim = Simulation::with_params(params);
    sim.set_algae_birth(args.birth);

    if let Err(e) = sim.start(&args.file) {
        log::error!("Failed to load {}: {e}", args.file.display());
        return ExitCode::FAILURE;
    }

    for _ in 0..args.ticks {
        sim.step();
    }

    let counts = sim.counts();
    log::info!(
        "After {} ticks: {} algae, {} corals, {} scavengers",
        sim.tick_count(),
        counts.algae,
        counts.corals,
        counts.scavengers
    );

    if let Some(out) = &args.save {
        if let Err(e) = sim.save(out) {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&sim.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize snapshot: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
