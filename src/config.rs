//! Run configuration
//!
//! [`PlotConfig`] is what the pipeline consumes; the CLI only fills it in.

use crate::chart::{ChartOptions, ChartStyle, TickStep};
use crate::error::{PlotError, Result};
use std::path::PathBuf;

/// Input file used when none is given
pub const DEFAULT_INPUT: &str = "membench.csv";
/// Measurement column plotted in single-column mode
pub const DEFAULT_COLUMN: &str = "time";

/// Which measurement columns become pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotMode {
    /// One page for the named column; `size` and `stride` looked up by name
    SingleColumn {
        /// Measurement column name
        column: String,
    },
    /// One page per column after the first two, taken by position
    AllColumns,
}

impl Default for PlotMode {
    fn default() -> Self {
        Self::SingleColumn {
            column: DEFAULT_COLUMN.to_string(),
        }
    }
}

/// Everything one run needs
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// CSV to read
    pub input: PathBuf,
    /// Output override; defaults to the input with a `.pdf` extension
    pub output: Option<PathBuf>,
    /// Page selection
    pub mode: PlotMode,
    /// Chart options shared by every page
    pub chart: ChartOptions,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: None,
            mode: PlotMode::default(),
            chart: ChartOptions::default(),
        }
    }
}

impl PlotConfig {
    /// Configuration for `input` with default settings
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Set the input path
    #[must_use]
    pub fn with_input<P: Into<PathBuf>>(mut self, input: P) -> Self {
        self.input = input.into();
        self
    }

    /// Write to `output` instead of the derived path
    #[must_use]
    pub fn with_output<P: Into<PathBuf>>(mut self, output: P) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Set the page selection
    #[must_use]
    pub fn with_mode(mut self, mode: PlotMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the tick strategy
    #[must_use]
    pub fn with_tick_step(mut self, tick_step: TickStep) -> Self {
        self.chart.tick_step = tick_step;
        self
    }

    /// Set the cache capacities to mark, L1 first
    #[must_use]
    pub fn with_cache_sizes(mut self, cache_sizes: Vec<u64>) -> Self {
        self.chart.cache_sizes = cache_sizes;
        self
    }

    /// Set the figure geometry and fonts
    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.chart.style = style;
        self
    }

    /// Where the document will be written
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("pdf"))
    }

    /// Page size in points
    #[must_use]
    pub fn page_size(&self) -> (f64, f64) {
        let style = &self.chart.style;
        (style.width_in * 72.0, style.height_in * 72.0)
    }

    /// Reject settings that cannot produce a chart.
    ///
    /// # Errors
    /// Returns [`PlotError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        let style = &self.chart.style;
        if !(style.width_in > 0.0 && style.height_in > 0.0 && style.dpi > 0.0) {
            return Err(PlotError::InvalidConfig(format!(
                "figure must have positive size, got {}x{} in at {} dpi",
                style.width_in, style.height_in, style.dpi
            )));
        }
        if let TickStep::Adaptive { target: 0 } = self.chart.tick_step {
            return Err(PlotError::InvalidConfig(
                "target tick count must be at least 1".to_string(),
            ));
        }
        if let PlotMode::SingleColumn { column } = &self.mode {
            if column.trim().is_empty() {
                return Err(PlotError::InvalidConfig(
                    "measurement column name is empty".to_string(),
                ));
            }
        }
        if self.input == self.output_path() {
            return Err(PlotError::InvalidConfig(format!(
                "output would overwrite the input {}",
                self.input.display()
            )));
        }
        Ok(())
    }
}
