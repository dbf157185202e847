//! The load → sanitize → group → render → write pipeline.

use crate::chart::{render_chart, ChartLayout};
use crate::config::{PlotConfig, PlotMode};
use crate::data::{ColumnRoles, ResultTable};
use crate::error::Result;
use crate::group::{SeriesSet, SeriesSummary};
use crate::pdf::PdfDocument;
use plotters::prelude::IntoDrawingArea;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// What a run read and wrote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// CSV that was read
    pub input: PathBuf,
    /// PDF that was written
    pub output: PathBuf,
    /// Data rows in the input
    pub rows: usize,
    /// Negative cells replaced with "no data"
    pub cells_nullified: usize,
    /// One entry per page, in page order
    pub pages: Vec<SeriesSummary>,
    /// Size of the written document in bytes
    pub bytes: u64,
}

/// Resolve column roles for the configured mode.
///
/// # Errors
/// Returns [`crate::PlotError::MissingField`] when a required column is absent.
pub fn resolve_roles(table: &ResultTable, mode: &PlotMode) -> Result<ColumnRoles> {
    match mode {
        PlotMode::SingleColumn { column } => ColumnRoles::named(table, column),
        PlotMode::AllColumns => ColumnRoles::positional(table),
    }
}

/// Run the whole pipeline for `config`.
///
/// Pages are written in measurement-column order. If a page fails to
/// render, the pages before it are still written and the error is returned.
///
/// # Errors
/// Any [`crate::PlotError`]; all are fatal.
pub fn run(config: &PlotConfig) -> Result<RunSummary> {
    config.validate()?;

    let mut table = ResultTable::from_path(&config.input)?;
    let report = table.sanitize();
    let roles = resolve_roles(&table, &config.mode)?;
    debug!(?roles, rows = table.n_rows(), "resolved columns");

    let show_title = matches!(config.mode, PlotMode::AllColumns);
    let options = crate::chart::ChartOptions {
        show_title,
        ..config.chart.clone()
    };
    let canvas = options.style.canvas_px();

    let mut document = PdfDocument::new(config.output_path(), config.page_size());
    let mut pages = Vec::with_capacity(roles.measurements.len());
    for &measurement in &roles.measurements {
        let set = SeriesSet::build(&table, &roles, measurement)?;
        let layout = ChartLayout::compute(&set, &options);
        {
            let area = document.page_backend(canvas).into_drawing_area();
            render_chart(&area, &set, &layout, &options.style)?;
            area.present()?;
        }
        info!(column = %set.column, page = document.page_count(), "rendered page");
        pages.push(set.summary());
    }

    let written = document.finish()?;
    Ok(RunSummary {
        input: config.input.clone(),
        output: written.path,
        rows: table.n_rows(),
        cells_nullified: report.cells_nullified,
        pages,
        bytes: written.bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlotError;
    use lopdf::Document;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("write CSV");
        path
    }

    #[test]
    fn test_single_column_end_to_end() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_csv(
            &dir,
            "membench.csv",
            "size,stride,time\n1024,4,2.1\n1024,8,-1\n2048,4,3.0\n",
        );

        let summary = run(&PlotConfig::new(&input)).expect("run");

        assert_eq!(summary.output, dir.path().join("membench.pdf"));
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.cells_nullified, 1);
        assert_eq!(summary.pages.len(), 1);
        assert_eq!(summary.pages[0].groups, 2);
        assert_eq!(summary.pages[0].points, 2);
        assert!((summary.pages[0].min_value - 2.1).abs() < 1e-12);
        let size = fs::metadata(&summary.output).expect("output").len();
        assert!(size > 0);
        assert_eq!(size, summary.bytes);
    }

    #[test]
    fn test_all_columns_one_page_each() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_csv(
            &dir,
            "multi.csv",
            "size,stride,read,write,copy\n64,4,1,2,3\n64,8,1.5,2.5,3.5\n128,4,2,3,4\n",
        );
        let config = PlotConfig::new(&input).with_mode(PlotMode::AllColumns);

        let summary = run(&config).expect("run");

        let columns: Vec<&str> = summary.pages.iter().map(|p| p.column.as_str()).collect();
        assert_eq!(columns, vec!["read", "write", "copy"]);
        let doc = Document::load(&summary.output).expect("parse PDF");
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().expect("temp dir");
        let config = PlotConfig::new(dir.path().join("absent.csv"));
        assert!(matches!(run(&config), Err(PlotError::IoError { .. })));
        assert!(!dir.path().join("absent.pdf").exists());
    }

    #[test]
    fn test_missing_measurement_column() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_csv(&dir, "t.csv", "size,stride,latency\n64,4,1\n");
        let err = run(&PlotConfig::new(&input)).unwrap_err();
        assert!(matches!(err, PlotError::MissingField { ref field, .. } if field == "time"));
    }

    #[test]
    fn test_empty_column_keeps_earlier_pages() {
        let dir = TempDir::new().expect("temp dir");
        let input = write_csv(
            &dir,
            "partial.csv",
            "size,stride,good,bad\n64,4,1,-1\n64,8,2,-2\n",
        );
        let config = PlotConfig::new(&input).with_mode(PlotMode::AllColumns);

        let err = run(&config).unwrap_err();

        assert!(matches!(err, PlotError::EmptyData { .. }));
        let doc = Document::load(dir.path().join("partial.pdf")).expect("flushed PDF");
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_resolve_roles_by_mode() {
        let table = ResultTable::from_reader("stride,size,time\n4,64,1\n".as_bytes())
            .expect("table");
        let named = resolve_roles(&table, &PlotMode::default()).expect("named");
        assert_eq!((named.size, named.stride), (1, 0));
        let positional = resolve_roles(&table, &PlotMode::AllColumns).expect("positional");
        assert_eq!((positional.size, positional.stride), (0, 1));
    }
}
