//! chash Binary
//!
//! Reads a command batch, runs it concurrently and writes the audit trail.

use std::path::PathBuf;
use std::sync::Arc;

use chash::audit::WriterSink;
use chash::batch::load_batch;
use chash::config::DEFAULT_MAX_NAME_LEN;
use chash::{Config, Dispatcher, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// chash batch runner
#[derive(Parser, Debug)]
#[command(name = "chash")]
#[command(about = "Run a batch of table commands concurrently against a shared store")]
#[command(version)]
struct Args {
    /// Batch file, one command per line
    #[arg(short, long, default_value = "commands.txt")]
    commands: PathBuf,

    /// Audit trail output file (truncated)
    #[arg(short, long, default_value = "output.txt")]
    output: PathBuf,

    /// Longest accepted name, in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_NAME_LEN)]
    max_name_len: usize,

    /// Skip the final counts-and-export step
    #[arg(long)]
    no_final_dump: bool,

    /// Debug-level diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging
    let default_filter = if args.verbose {
        "info,chash=debug"
    } else {
        "info,chash=info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("chash v{}", chash::VERSION);
    tracing::info!("Commands: {}", args.commands.display());
    tracing::info!("Output: {}", args.output.display());

    // Build config from args
    let config = Config::builder()
        .commands_path(args.commands.clone())
        .output_path(args.output.clone())
        .max_name_len(args.max_name_len)
        .final_dump(!args.no_final_dump)
        .build();

    if let Err(e) = run(config) {
        tracing::error!("{}", e);
        eprintln!("chash: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    config.validate()?;

    let batch = load_batch(&config)?;

    let sink = Arc::new(WriterSink::create(&config.output_path)?);
    let dispatcher = Dispatcher::new(config, sink);
    let report = dispatcher.run(batch)?;

    let found = report
        .searches
        .iter()
        .filter(|outcome| outcome.record.is_some())
        .count();
    tracing::info!(
        searches = report.searches.len(),
        found,
        records = report.final_records.len(),
        "Batch complete"
    );
    Ok(())
}
