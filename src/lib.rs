//! membench-plot: memory-hierarchy latency charts from benchmark results.
//!
//! Reads a CSV of `size`, `stride` and timing columns, drops negative
//! measurements, groups rows by working-set size and draws one
//! latency-vs-stride line per group on a base-2 log axis, annotated with
//! cache-capacity and minimum-latency markers. Charts are written as pages
//! of a single PDF.
//!
//! # Quick Start
//!
//! ```no_run
//! use membench_plot::{run, PlotConfig, PlotMode};
//!
//! let config = PlotConfig::new("membench.csv").with_mode(PlotMode::AllColumns);
//! let summary = run(&config)?;
//! println!("{} page(s) in {}", summary.pages.len(), summary.output.display());
//! # Ok::<(), membench_plot::PlotError>(())
//! ```
//!
//! # Modules
//!
//! - [`data`]: CSV loading and sanitization
//! - [`group`]: one series per working-set size
//! - [`chart`]: ticks, markers, layout and drawing
//! - [`pdf`]: plotters backend and PDF writer
//! - [`units`]: byte-size formatting and parsing

pub mod chart;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod group;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod units;

pub use config::{PlotConfig, PlotMode};
pub use error::{PlotError, Result};
pub use pipeline::{run, RunSummary};
