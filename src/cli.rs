//! Command-line arguments.

use crate::chart::{TickStep, DEFAULT_TARGET_TICKS};
use crate::config::{PlotConfig, PlotMode, DEFAULT_COLUMN, DEFAULT_INPUT};
use crate::units::parse_size;
use clap::Parser;
use std::path::PathBuf;

/// membench-plot - memory latency charts
///
/// Reads membench results (size, stride and timing columns) and writes a PDF
/// with one latency-vs-stride line per working-set size.
#[derive(Parser, Debug)]
#[command(name = "membench-plot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Benchmark results CSV
    #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Output PDF (default: INPUT with a .pdf extension)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// One page per measurement column; columns are taken by position
    #[arg(short, long)]
    pub all_columns: bool,

    /// Measurement column to plot in single-column mode
    #[arg(short, long, default_value = DEFAULT_COLUMN, conflicts_with = "all_columns")]
    pub column: String,

    /// Fixed exponent step between stride ticks
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub tick_step: Option<u32>,

    /// Tick count the adaptive step aims for
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TARGET_TICKS, conflicts_with = "tick_step")]
    pub target_ticks: u32,

    /// Cache capacities to mark, L1 first (e.g. 32K,256K,6M)
    #[arg(
        long,
        value_name = "SIZES",
        value_delimiter = ',',
        value_parser = parse_size,
        default_values = ["32K", "256K", "6M"]
    )]
    pub cache_sizes: Vec<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration
    #[must_use]
    pub fn into_config(self) -> PlotConfig {
        let mode = if self.all_columns {
            PlotMode::AllColumns
        } else {
            PlotMode::SingleColumn {
                column: self.column,
            }
        };
        let tick_step = match self.tick_step {
            Some(step) => TickStep::Fixed(step),
            None => TickStep::Adaptive {
                target: self.target_ticks,
            },
        };

        let config = PlotConfig::new(self.input)
            .with_mode(mode)
            .with_tick_step(tick_step)
            .with_cache_sizes(self.cache_sizes);
        match self.output {
            Some(output) => config.with_output(output),
            None => config,
        }
    }
}
