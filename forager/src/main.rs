use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use forager::summary::{self, DEFAULT_UNTIL};
use forager::{SimulationConfig, load_config, swarm};
use tracing::info;

/// Command-line arguments for Forager.
#[derive(Parser)]
#[command(name = "forager", version, about = "Foraging arena controller")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the arena headless with a scripted swarm
    Run {
        /// Path to the TOML configuration file.
        #[arg(short, long)]
        config: PathBuf,
        /// Override the food placement seed
        #[arg(long)]
        seed: Option<u64>,
        /// Override the number of ticks to run
        #[arg(short, long)]
        ticks: Option<u64>,
        /// Override the statistics log path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Summarize a statistics log
    Summarize {
        /// Log written by `run`
        log: PathBuf,
        /// Ignore records after this clock value
        #[arg(long, default_value_t = DEFAULT_UNTIL)]
        until: u64,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Loads the configuration file and applies command-line overrides.
fn load_run_config(
    path: PathBuf,
    seed: Option<u64>,
    ticks: Option<u64>,
    output: Option<PathBuf>,
) -> Result<SimulationConfig> {
    let mut config = load_config(&path)
        .with_context(|| format!("Error loading config '{}'", path.display()))?;
    info!("Loaded config from '{}'", path.display());

    if seed.is_some() {
        config.foraging.seed = seed;
    }
    if let Some(ticks) = ticks {
        config.run.ticks = ticks;
    }
    if let Some(output) = output {
        config.foraging.output = output;
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            seed,
            ticks,
            output,
        } => {
            let config = load_run_config(config, seed, ticks, output)?;
            let report = swarm::run(&config)?;

            println!("seed:            {}", report.seed);
            match report.last {
                Some(last) => {
                    println!("ticks:           {}", last.clock);
                    println!("collected food:  {}", last.collected_food);
                    println!("energy:          {}", last.energy);
                }
                None => println!("ticks:           0"),
            }
            println!("per walker:      {:?}", report.delivered_per_walker);
            println!("log:             {}", config.foraging.output.display());
        }
        Command::Summarize { log, until } => {
            let summary = summary::summarize_file(&log, until)
                .with_context(|| format!("Error summarizing '{}'", log.display()))?;
            println!("ticks:           {}", summary.ticks);
            if let Some(last) = summary.last {
                println!("collected food:  {}", last.collected_food);
                println!("energy:          {}", last.energy);
            }
            println!("mean walking:    {:.2}", summary.mean_walking);
            println!("mean resting:    {:.2}", summary.mean_resting);
        }
    }
    Ok(())
}
