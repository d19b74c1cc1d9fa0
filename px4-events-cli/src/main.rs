//! PX4 Events CLI Application
//!
//! Command-line front end for the px4-events library. It adds:
//! - Argument parsing and optional TOML configuration
//! - Logging setup
//! - Running the scan with the annotation parser and saving the JSON output

use anyhow::{bail, Context, Result};
use clap::Parser;
use px4_events::{AnnotationParser, EventModel, JsonOutput, SaveOutcome, ScanConfig, SourceScanner};
use std::path::PathBuf;

mod config;

use config::AppConfig;

/// Output file used when neither the command line nor the config names one
const DEFAULT_OUTPUT: &str = "events.json";

/// PX4 Events - Extract event metadata from source files
#[derive(Parser, Debug)]
#[command(name = "px4-events-cli")]
#[command(about = "Extract event declarations from source files into a JSON description", long_about = None)]
#[command(version)]
struct Args {
    /// Source files or directories to scan
    #[arg(value_name = "PATH")]
    paths: Vec<PathBuf>,

    /// Output JSON file (default: events.json)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// File extension to scan in directories (can be repeated, default: .cpp)
    #[arg(short, long, value_name = "EXT")]
    extension: Vec<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

/// Inputs after merging command line and config file
#[derive(Debug, PartialEq)]
struct RunPlan {
    paths: Vec<PathBuf>,
    scan_config: ScanConfig,
    output: PathBuf,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("PX4 Events CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using px4-events library v{}", px4_events::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let plan = plan_run(args, config)?;
    run(&plan)
}

/// Command-line values take precedence over the config file
fn plan_run(args: Args, config: AppConfig) -> Result<RunPlan> {
    let paths = if args.paths.is_empty() {
        config.input.paths
    } else {
        args.paths
    };
    if paths.is_empty() {
        bail!("No input paths given (pass PATH arguments or set [input] paths in the config file)");
    }

    let scan_config = if args.extension.is_empty() {
        config.input.scan
    } else {
        ScanConfig::new().with_extensions(args.extension)
    };

    let output = args
        .output
        .or(config.output.file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    Ok(RunPlan {
        paths,
        scan_config,
        output,
    })
}

/// Scan all inputs and save the JSON output
fn run(plan: &RunPlan) -> Result<()> {
    let scanner = SourceScanner::with_config(plan.scan_config.clone());
    let mut model = EventModel::new();

    let summary = scanner
        .scan(&plan.paths, &mut AnnotationParser::new(), &mut model)
        .context("Scanning sources failed")?;

    if !summary.unreadable.is_empty() {
        log::warn!("{} file(s) could not be read and were skipped", summary.unreadable.len());
    }
    if !summary.unlistable.is_empty() {
        log::warn!(
            "{} director(ies) could not be listed and were skipped",
            summary.unlistable.len()
        );
    }
    if !summary.completed {
        bail!("Scan stopped before all files were processed, no output written");
    }

    let outcome = JsonOutput::new(&model)
        .save(&plan.output)
        .with_context(|| format!("Failed to save events to {:?}", plan.output))?;

    let stats = model.stats();
    match outcome {
        SaveOutcome::Written => log::info!(
            "Wrote {} event(s) in {} group(s) to {:?}",
            stats.num_events,
            stats.num_groups,
            plan.output
        ),
        SaveOutcome::Unchanged => log::info!("{:?} is up to date", plan.output),
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
