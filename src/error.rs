//! Error types for membench-plot.
//!
//! Every failure in the pipeline is fatal; the variants only exist so the
//! CLI can report what went wrong and exit with a distinct code.

use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors raised while loading, grouping, rendering or writing
#[derive(Error, Debug)]
pub enum PlotError {
    /// Input file missing or unreadable
    #[error("I/O error on {path}: {message}")]
    IoError {
        /// Offending path
        path: String,
        /// Underlying cause
        message: String,
    },

    /// Malformed CSV content
    #[error("CSV parse error at line {line}, column '{column}': {message}")]
    CsvParse {
        /// 1-based line number in the input
        line: usize,
        /// Column name (or "headers")
        column: String,
        /// Underlying cause
        message: String,
    },

    /// Required column not present in the header
    #[error("Missing column '{field}'. {hint}")]
    MissingField {
        /// Column that was looked up
        field: String,
        /// What the table offers instead
        hint: String,
    },

    /// Nothing left to plot after sanitization
    #[error("No plottable data: {context}")]
    EmptyData {
        /// Where the data ran out
        context: String,
    },

    /// Invalid command-line or configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Chart drawing failed
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Output document could not be written
    #[error("Failed to write {path}: {message}")]
    Write {
        /// Output path
        path: String,
        /// Underlying cause
        message: String,
    },
}

impl PlotError {
    /// Get exit code for this error
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::IoError { .. } => ExitCode::from(3),
            Self::CsvParse { .. } | Self::MissingField { .. } => ExitCode::from(4),
            Self::EmptyData { .. } => ExitCode::from(5),
            Self::Render(_) => ExitCode::from(6),
            Self::Write { .. } => ExitCode::from(7),
            Self::InvalidConfig(_) => ExitCode::from(2),
        }
    }
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Self::Render(e.to_string())
    }
}
