//! membench-plot - render memory benchmark results as PDF charts
//!
//! Usage:
//!   membench-plot                        # membench.csv -> membench.pdf
//!   membench-plot results.csv -a         # one page per measurement column
//!   membench-plot results.csv -o out.pdf --cache-sizes 48K,1280K,30M

use clap::Parser;
use membench_plot::cli::Cli;
use membench_plot::{output, run};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let json = cli.json;
    let config = cli.into_config();
    let result = run(&config).and_then(|summary| output::print_summary(&summary, json));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            e.exit_code()
        }
    }
}
