//! Benchmark result table loading and sanitization
//!
//! Provides:
//! - CSV loading into an in-memory [`ResultTable`]
//! - Nullification of negative cells ([`ResultTable::sanitize`])
//! - Column role resolution for named and positional layouts

mod roles;

pub use roles::ColumnRoles;

use crate::error::{PlotError, Result};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A single cell; `None` means "no data".
pub type Cell = Option<f64>;

/// Tabular benchmark results: a header row and numeric cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// What [`ResultTable::sanitize`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Cells replaced with "no data"
    pub cells_nullified: usize,
    /// Rows that had at least one cell nullified
    pub rows_affected: usize,
}

impl ResultTable {
    /// Build a table from headers and rows.
    ///
    /// # Errors
    /// Returns error if there are no columns or a row width differs from
    /// the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        if headers.is_empty() {
            return Err(PlotError::EmptyData {
                context: "table has no columns".to_string(),
            });
        }
        if let Some(idx) = rows.iter().position(|r| r.len() != headers.len()) {
            return Err(PlotError::CsvParse {
                line: idx + 2,
                column: "row".to_string(),
                message: format!(
                    "expected {} fields, found {}",
                    headers.len(),
                    rows[idx].len()
                ),
            });
        }
        Ok(Self { headers, rows })
    }

    /// Load a comma-separated file with a header row.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or a cell is not numeric.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| PlotError::IoError {
            path: path.display().to_string(),
            message: format!("Failed to open CSV: {e}"),
        })?;
        let table = Self::from_reader(file)?;
        debug!(
            path = %path.display(),
            rows = table.n_rows(),
            columns = table.n_cols(),
            "loaded result table"
        );
        Ok(table)
    }

    /// Parse CSV from any reader.
    ///
    /// Empty cells and `NaN` become "no data". Any other non-numeric cell is
    /// a parse error, as is an infinite value (`inf`, or a literal such as
    /// `1e309` that overflows `f64`).
    ///
    /// # Errors
    /// Returns error on malformed CSV or non-numeric cells.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| PlotError::CsvParse {
                line: 1,
                column: "headers".to_string(),
                message: format!("Failed to read headers: {e}"),
            })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        let mut line_num = 2; // Start after header

        for result in reader.records() {
            let record = result.map_err(|e| PlotError::CsvParse {
                line: line_num,
                column: "row".to_string(),
                message: format!("Failed to read row: {e}"),
            })?;

            let row = record
                .iter()
                .zip(&headers)
                .map(|(value, column)| {
                    parse_cell(value).ok_or_else(|| PlotError::CsvParse {
                        line: line_num,
                        column: column.clone(),
                        message: format!("'{value}' is not a finite number"),
                    })
                })
                .collect::<Result<Vec<Cell>>>()?;
            rows.push(row);
            line_num += 1;
        }

        Self::new(headers, rows)
    }

    /// Replace every negative cell with "no data".
    pub fn sanitize(&mut self) -> SanitizeReport {
        let mut report = SanitizeReport::default();
        for row in &mut self.rows {
            let mut touched = false;
            for cell in row.iter_mut() {
                if matches!(cell, Some(v) if *v < 0.0) {
                    *cell = None;
                    report.cells_nullified += 1;
                    touched = true;
                }
            }
            if touched {
                report.rows_affected += 1;
            }
        }
        debug!(
            cells = report.cells_nullified,
            rows = report.rows_affected,
            "nullified negative cells"
        );
        report
    }

    /// Column names in file order
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of data rows
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    /// Position of a column by exact name.
    ///
    /// # Errors
    /// Returns [`PlotError::MissingField`] listing the available columns.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PlotError::MissingField {
                field: name.to_string(),
                hint: format!("Available columns: {:?}", self.headers),
            })
    }

    /// Cell value, `None` when missing or out of range.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// Iterate over rows as cell slices
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

fn parse_cell(value: &str) -> Option<Cell> {
    if value.is_empty() {
        return Some(None);
    }
    let parsed: f64 = value.parse().ok()?;
    if parsed.is_nan() {
        Some(None)
    } else if parsed.is_finite() {
        Some(Some(parsed))
    } else {
        None
    }
}
