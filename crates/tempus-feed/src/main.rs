//! Telemetry feed CLI
//!
//! Reads a vehicle data file (or stdin), runs every record through a locally
//! constructed scheduler, and prints a summary. Workers log each record as
//! it is dispatched.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tempus_feed::{FeedSummary, Feeder, RecordHandler};
use tempus_scheduler::{Scheduler, SchedulerConfig, ShutdownMode};

#[derive(Parser)]
#[command(name = "tempus-feed")]
#[command(about = "Feed vehicle telemetry records through the tempus scheduler")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Telemetry file to read; stdin when omitted
    input: Option<PathBuf>,

    /// Worker threads for the scheduler
    #[arg(long, default_value_t = 2)]
    workers: usize,

    /// Queue capacity before submissions are rejected
    #[arg(long, default_value_t = 256)]
    queue_size: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(summary) => {
            println!(
                "{} submitted={} malformed={} rejected={}",
                "Feed complete.".green().bold(),
                summary.submitted,
                summary.malformed,
                summary.rejected
            );
        }
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), err);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> tempus_types::Result<FeedSummary> {
    let scheduler = Scheduler::new(SchedulerConfig::new(cli.workers, cli.queue_size))?;

    let handler: RecordHandler = Arc::new(|record| {
        info!(
            vehicle = record.vehicle_id,
            speed = record.speed,
            engine_on = record.engine_on,
            code = ?record.error_code,
            "record processed"
        );
    });

    let feeder = Feeder::new(&scheduler);
    let summary = match &cli.input {
        Some(path) => feeder.run(BufReader::new(File::open(path)?), handler)?,
        None => feeder.run(io::stdin().lock(), handler)?,
    };

    // No sentinel in the input: drain whatever was submitted before exiting.
    if !summary.terminated {
        scheduler.shutdown(ShutdownMode::Graceful);
    }
    Ok(summary)
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
