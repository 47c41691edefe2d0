//! `poolgen` command-line entry point.
//!
//! Runs the built-in batch plan, or the plan given with `--config`, and
//! writes one address list document per batch into `--output`.
//!
//! Exit status: every batch is attempted even when one fails, but the
//! process exits non-zero if any batch could not be encoded or written,
//! or if the plan itself is invalid.

use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::fs;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use poolgen::config::RunConfig;
use poolgen::config_loader::{self, CliOverrides};
use poolgen::orchestrator;
use poolgen::output::{DocumentFormat, FileSink};

/// Generates power-of-two aligned IPv4 address pool definitions
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    after_help = "Exits non-zero if any batch could not be written; the remaining batches are still generated."
)]
struct Args {
    /// Path to a batch plan YAML file (the built-in plan is used otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the address list documents are written to
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Address of the first pool
    #[arg(long)]
    start_address: Option<Ipv4Addr>,

    /// Ordinal of the first pool name
    #[arg(long)]
    start_ordinal: Option<u64>,

    /// Document format
    #[arg(long, value_enum)]
    format: Option<DocumentFormat>,

    /// Write the built-in plan to this path and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Some(path) = &args.dump_config {
        return config_loader::write_default_config(path);
    }

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => {
            info!("No configuration file given, using the built-in batch plan");
            RunConfig::default()
        }
    };

    let overrides = CliOverrides {
        start_address: args.start_address,
        start_ordinal: args.start_ordinal,
        format: args.format,
    };
    config_loader::apply_overrides(&mut config, &overrides)?;

    info!("Output directory: {:?}", args.output);
    fs::create_dir_all(&args.output)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", args.output.display()))?;

    let mut sink = FileSink::new(&args.output);
    let report = orchestrator::run(&config, &mut sink)?;

    let failed: Vec<&str> = report.failures().map(|o| o.output_name.as_str()).collect();
    if !failed.is_empty() {
        warn!("{} of {} batches were not written", failed.len(), report.outcomes.len());
        return Err(eyre!("Failed batches: {}", failed.join(", ")));
    }

    info!("All {} batches written", report.outcomes.len());
    Ok(())
}
