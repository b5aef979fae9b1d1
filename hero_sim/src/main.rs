//! hero_sim - Headless training-range simulation driving hero_core

mod simulation;

use clap::Parser;
use hero_core::config::{default_registry, load_registry, ConfigError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simulation::{RangeConfig, TrainingRange};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "hero_sim", version, about = "Run a seeded training-range simulation")]
struct Args {
    /// Seed for the scripted player's decisions
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated seconds
    #[arg(long, default_value_t = 60.0)]
    duration: f64,

    /// Tick length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    tick: f64,

    /// Chance a fired shot lands, in [0, 1]
    #[arg(long, default_value_t = 0.6)]
    accuracy: f64,

    /// Directory holding heroes.toml, weapons.toml, abilities.toml and optionally constants.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<(), ConfigError> {
    init_logging();
    let args = Args::parse();

    let registry = match &args.config {
        Some(dir) => load_registry(dir)?,
        None => default_registry(),
    };
    info!(
        heroes = registry.heroes.len(),
        weapons = registry.weapons.len(),
        abilities = registry.abilities.len(),
        "definitions loaded"
    );

    let config = RangeConfig {
        duration: args.duration,
        tick: args.tick,
        accuracy: args.accuracy,
        ..RangeConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let report = TrainingRange::new(registry, config)?.run(&mut rng);

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(err) => error!(%err, "failed to serialize report"),
        }
    } else {
        println!("{}", report.summary());
    }

    Ok(())
}
