//! Mapping of table columns to size / stride / measurement roles.

use super::ResultTable;
use crate::error::{PlotError, Result};

/// Which columns play which part in the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Grouping key (working-set size in bytes)
    pub size: usize,
    /// Independent variable (stride in bytes)
    pub stride: usize,
    /// Dependent variables, one chart each
    pub measurements: Vec<usize>,
}

impl ColumnRoles {
    /// Resolve columns by name: `size`, `stride` and one measurement column.
    ///
    /// # Errors
    /// Returns [`PlotError::MissingField`] when any name is absent.
    pub fn named(table: &ResultTable, measurement: &str) -> Result<Self> {
        Ok(Self {
            size: table.column_index("size")?,
            stride: table.column_index("stride")?,
            measurements: vec![table.column_index(measurement)?],
        })
    }

    /// Resolve columns by position: 0 is size, 1 is stride, the rest are
    /// measurements.
    ///
    /// # Errors
    /// Returns [`PlotError::MissingField`] with fewer than three columns.
    pub fn positional(table: &ResultTable) -> Result<Self> {
        if table.n_cols() < 3 {
            return Err(PlotError::MissingField {
                field: "measurement".to_string(),
                hint: format!(
                    "Expected size, stride and at least one measurement column, found {:?}",
                    table.headers()
                ),
            });
        }
        Ok(Self {
            size: 0,
            stride: 1,
            measurements: (2..table.n_cols()).collect(),
        })
    }
}
