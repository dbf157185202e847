//! Partitioning of a sanitized table into one series per working-set size.

use crate::data::{ColumnRoles, ResultTable};
use crate::error::{PlotError, Result};
use crate::units::format_bytes_or_raw;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One plotted line: every row sharing a size value.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Working-set size in bytes
    pub size: u64,
    /// Legend label, e.g. "32 KB"
    pub label: String,
    /// `(stride, value)` pairs in file order
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Smallest and largest stride in this series
    #[must_use]
    pub fn stride_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.points.iter().map(|p| p.0))
    }

    /// Smallest and largest measured value in this series
    #[must_use]
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        bounds(self.points.iter().map(|p| p.1))
    }
}

/// All series for one measurement column plus the ranges the chart needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSet {
    /// Measurement column name
    pub column: String,
    /// Series in ascending size order
    pub series: Vec<Series>,
    /// Smallest and largest plotted stride across all series
    pub stride_range: (f64, f64),
    /// Smallest and largest plotted value across all series
    pub value_range: (f64, f64),
}

/// Per-page facts reported back to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    /// Measurement column name
    pub column: String,
    /// Number of series drawn
    pub groups: usize,
    /// Number of plotted points
    pub points: usize,
    /// Minimum latency in ns
    pub min_value: f64,
}

impl SeriesSet {
    /// Group the rows of `table` by the size column for one measurement.
    ///
    /// Rows whose size, stride or measurement is missing are skipped, as are
    /// rows with a non-positive stride (they cannot sit on a log axis). A
    /// size that only ever appears on skipped rows still produces a series,
    /// with no points.
    ///
    /// # Errors
    /// Returns [`PlotError::EmptyData`] if no row is plottable.
    pub fn build(table: &ResultTable, roles: &ColumnRoles, measurement: usize) -> Result<Self> {
        let column = table
            .headers()
            .get(measurement)
            .cloned()
            .ok_or_else(|| PlotError::MissingField {
                field: format!("column #{measurement}"),
                hint: format!("Table has {} columns", table.n_cols()),
            })?;

        let mut groups: BTreeMap<u64, Vec<(f64, f64)>> = BTreeMap::new();
        for row in table.rows() {
            let Some(size) = row.get(roles.size).copied().flatten() else {
                continue;
            };
            let points = groups.entry(size.round() as u64).or_default();

            let stride = row.get(roles.stride).copied().flatten();
            let value = row.get(measurement).copied().flatten();
            if let (Some(stride), Some(value)) = (stride, value) {
                if stride > 0.0 {
                    points.push((stride, value));
                }
            }
        }

        let series: Vec<Series> = groups
            .into_iter()
            .map(|(size, points)| Series {
                size,
                label: format_bytes_or_raw(size),
                points,
            })
            .collect();

        let all_points = || series.iter().flat_map(|s| s.points.iter());
        let empty = || PlotError::EmptyData {
            context: format!("column '{column}' has no valid stride/value pairs"),
        };
        let stride_range = bounds(all_points().map(|p| p.0)).ok_or_else(empty)?;
        let value_range = bounds(all_points().map(|p| p.1)).ok_or_else(empty)?;

        debug!(
            column = %column,
            groups = series.len(),
            min_stride = stride_range.0,
            max_stride = stride_range.1,
            min_value = value_range.0,
            "grouped series"
        );

        Ok(Self {
            column,
            series,
            stride_range,
            value_range,
        })
    }

    /// Minimum measured value across every series
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.value_range.0
    }

    /// Summary of what will be drawn
    #[must_use]
    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary {
            column: self.column.clone(),
            groups: self.series.len(),
            points: self.series.iter().map(|s| s.points.len()).sum(),
            min_value: self.min_value(),
        }
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
