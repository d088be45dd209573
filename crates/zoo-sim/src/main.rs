//! Command-line runner for the zoo population simulation.

mod report;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use zoo_core::SimulationConfig;
use zoo_world::{Batch, NullSink};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file; the reference zoo is simulated when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Random seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of independent runs
    #[arg(short, long, default_value_t = 1)]
    runs: u32,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Do not print a line for every mating and hunting event
    #[arg(short, long)]
    quiet: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    telemetry::init_telemetry(args.log_json)?;

    let config = load_config(&args)?;

    if args.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    info!(
        width = config.area.width,
        height = config.area.height,
        species = config.species.len(),
        total_ticks = config.total_ticks,
        runs = args.runs,
        "Starting zoo simulation"
    );

    let batch = Batch::new(config, args.runs)?;
    let stdout = io::stdout();

    let outcome = if args.quiet || args.format == OutputFormat::Json {
        batch.execute(&mut NullSink)?
    } else {
        let mut printer = report::EventPrinter::new(stdout.lock());
        let outcome = batch.execute(&mut printer)?;
        printer.finish().context("failed to write event log")?;
        outcome
    };

    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Text => {
            for result in &outcome.results {
                report::write_result(result, &mut out)?;
            }
            if outcome.results.len() > 1 {
                report::write_batch_summary(&outcome.summary, &mut out)?;
            }
        }
        OutputFormat::Json => {
            match outcome.results.as_slice() {
                [single] => report::write_json(single, &mut out)?,
                _ => report::write_json(&outcome, &mut out)?,
            }
        }
    }
    out.flush()?;

    Ok(())
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(ticks) = args.ticks {
        config.total_ticks = ticks;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}
