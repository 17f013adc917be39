//! Command-line runner for the viaduct query catalog.
//!
//! Loads a CSV dataset directory into the embedded store, runs one named
//! query or the whole catalog, and prints the reports as a table or JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use viaduct_core::prelude::*;

mod config;
mod output;

/// Load a transit dataset and run canned analytical queries against it.
#[derive(Debug, Parser)]
#[command(name = "viaduct", version, about)]
pub(crate) struct Args {
    /// Directory containing the CSV dataset
    #[arg(long, value_name = "DIR")]
    data_dir: PathBuf,

    /// Query to run, Q1 through Q10
    #[arg(long, value_name = "ID", conflicts_with = "all")]
    query: Option<String>,

    /// Run every query in the catalog
    #[arg(long)]
    all: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: Format,

    /// TOML file overriding the default query parameters
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Line name for Q1
    #[arg(long, value_name = "NAME")]
    line: Option<String>,

    /// Trip id for Q4
    #[arg(long, value_name = "ID")]
    trip: Option<String>,

    /// Stop name for Q5; pass the flag once per target stop
    #[arg(long = "stop", value_name = "NAME")]
    stops: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let params = config::resolve_params(args)?;
    let store = load_dataset(&DatasetConfig::new(&args.data_dir))?;
    info!(
        "dataset ready: {} lines, {} stops, {} trips",
        store.line_count(),
        store.stop_count(),
        store.trip_count()
    );

    if args.all {
        let reports = run_all(&store, &params)?;
        match args.format {
            Format::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
            Format::Table => {
                for report in &reports {
                    output::print_table(report);
                }
            }
        }
    } else if let Some(raw) = &args.query {
        let report = run_query(&store, raw.parse()?, &params)?;
        match args.format {
            Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            Format::Table => output::print_table(&report),
        }
    } else {
        return Err(Error::InvalidData(
            "pass --query <ID> or --all".to_string(),
        ));
    }
    Ok(())
}
