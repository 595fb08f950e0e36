//! Status History CLI Application
//!
//! This is the command-line interface for the status history library.
//! It uses the status-history library and adds:
//! - TOML configuration
//! - Event loading (JSON or `date,delta,flag` records)
//! - Report rendering (TXT/JSON)
//! - A built-in demo history

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use status_history::{build_report, DateRange, Event};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

mod config;
mod events;
mod render;

use config::{AppConfig, OutputFormat, RangeConfig};

/// Status History - Daily cumulative flag counts from dated tick events
#[derive(Parser, Debug)]
#[command(name = "status-history-cli")]
#[command(about = "Report day-by-day cumulative flag counts from dated events", long_about = None)]
#[command(version)]
struct Args {
    /// First day of the report (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    from: Option<NaiveDate>,

    /// Last day of the report, inclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    to: Option<NaiveDate>,

    /// Event file: .json array or one `date,delta,flag` record per line
    #[arg(short, long, value_name = "FILE")]
    events: Option<PathBuf>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file for the report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn has_input(&self) -> bool {
        self.from.is_some() || self.to.is_some() || self.events.is_some() || self.config.is_some()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("Status History CLI v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using status-history library v{}", status_history::VERSION);

    let (range, events, format, output) = if args.has_input() {
        configured_run(&args)?
    } else {
        log::info!("No input specified, running the built-in demo");
        (
            events::demo_range()?,
            events::sample_events()?,
            args.format.unwrap_or_default(),
            args.output.clone(),
        )
    };

    if range.is_empty() {
        log::warn!("Report range {}..={} is inverted; the report is empty", range.from(), range.to());
    }

    let report = build_report(range.from(), range.to(), &events);
    log::info!(
        "Built report: {} days, {} flags from {} events",
        report.len(),
        report.flags().len(),
        events.len()
    );

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            render::write_report(&report, format, &mut BufWriter::new(file))?;
            log::info!("Report written to {:?}", path);
        }
        None => {
            let stdout = io::stdout();
            render::write_report(&report, format, &mut stdout.lock())?;
        }
    }

    Ok(())
}

/// Merge config file and command-line arguments (arguments win)
fn configured_run(args: &Args) -> Result<(DateRange, Vec<Event>, OutputFormat, Option<PathBuf>)> {
    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let range = RangeConfig {
        from: args.from.or(config.range.from),
        to: args.to.or(config.range.to),
    }
    .resolve()?;

    // An events file named in the config is relative to the config's directory
    let events_file = match (&args.events, &config.input.events_file, &args.config) {
        (Some(path), _, _) => Some(path.clone()),
        (None, Some(path), Some(config_path)) => Some(
            config_path
                .parent()
                .map(|dir| dir.join(path))
                .unwrap_or_else(|| path.clone()),
        ),
        (None, other, _) => other.clone(),
    };

    let mut events = config.events;
    if let Some(path) = &events_file {
        events.extend(events::load_events(path)?);
    }

    let format = args.format.unwrap_or(config.output.format);
    let output = args.output.clone().or(config.output.path);

    Ok((range, events, format, output))
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
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
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
