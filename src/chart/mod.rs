//! Chart layout and drawing
//!
//! [`ChartLayout::compute`] turns a [`SeriesSet`] into axis ranges, ticks and
//! reference markers; [`render_chart`] draws that layout on any plotters
//! backend.

pub mod annotate;
pub mod style;
pub mod ticks;

pub use annotate::{CacheMarker, MinMarker, DEFAULT_CACHE_SIZES};
pub use style::{ChartStyle, LineDash, SeriesStyle};
pub use ticks::{TickStep, ValueTicks, DEFAULT_TARGET_TICKS};

use crate::error::Result;
use crate::group::SeriesSet;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use tracing::debug;

/// Share of the log-stride span added past the largest stride
const X_MARGIN: f64 = 0.05;
/// Headroom above the largest value
const Y_MARGIN: f64 = 1.05;
/// Length of minor tick marks, drawn inward
const MINOR_TICK_PX: i32 = 2;

/// Options that shape every page
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Stride tick spacing
    pub tick_step: TickStep,
    /// Cache capacities to mark, L1 first
    pub cache_sizes: Vec<u64>,
    /// Geometry and fonts
    pub style: ChartStyle,
    /// Print the measurement column as a page title
    pub show_title: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            tick_step: TickStep::default(),
            cache_sizes: DEFAULT_CACHE_SIZES.to_vec(),
            style: ChartStyle::default(),
            show_title: false,
        }
    }
}

/// Everything needed to draw one page, in data coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    /// Visible stride range
    pub x_range: (f64, f64),
    /// Top of the value axis (bottom is 0)
    pub y_top: f64,
    /// Stride tick locations inside `x_range`
    pub ticks: Vec<f64>,
    /// Unlabelled powers of two inside `x_range`
    pub minor_ticks: Vec<f64>,
    /// Value axis tick locations
    pub y_ticks: ValueTicks,
    /// Cache lines below the largest stride
    pub cache_markers: Vec<CacheMarker>,
    /// Minimum latency line
    pub min_marker: MinMarker,
    /// Value axis title
    pub y_desc: String,
    /// Page title
    pub title: Option<String>,
}

impl ChartLayout {
    /// Compute axis ranges, ticks and markers for `set`.
    #[must_use]
    pub fn compute(set: &SeriesSet, options: &ChartOptions) -> Self {
        let (min_stride, max_stride) = set.stride_range;
        let x_range = stride_axis(min_stride, max_stride);

        let ticks: Vec<f64> = ticks::stride_ticks(max_stride, options.tick_step)
            .into_iter()
            .map(|t| t as f64)
            .filter(|t| *t >= x_range.0 && *t <= x_range.1)
            .collect();

        let minor_ticks = ticks::minor_stride_ticks(x_range, &ticks);

        let y_max = set.value_range.1;
        let y_top = if y_max > 0.0 {
            (y_max * Y_MARGIN).min(f64::MAX)
        } else {
            1.0
        };

        Self {
            x_range,
            y_top,
            ticks,
            minor_ticks,
            y_ticks: ticks::value_ticks(y_top, ticks::DEFAULT_VALUE_TICKS),
            cache_markers: annotate::cache_markers(&options.cache_sizes, max_stride),
            min_marker: annotate::min_marker(set.min_value()),
            y_desc: format!("{} (ns)", set.column),
            title: options.show_title.then(|| set.column.clone()),
        }
    }
}

fn stride_axis(min_stride: f64, max_stride: f64) -> (f64, f64) {
    if max_stride <= min_stride {
        return (min_stride, min_stride * 2.0);
    }
    let span = (max_stride / min_stride).log2();
    (min_stride, (max_stride * (span * X_MARGIN).exp2()).min(f64::MAX))
}

/// Draw `set` on `root` following `layout`.
///
/// The caller presents the drawing area.
///
/// # Errors
/// Returns [`crate::PlotError::Render`] when the backend fails.
pub fn render_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    set: &SeriesSet,
    layout: &ChartLayout,
    style: &ChartStyle,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = layout.x_range;
    let mut builder = ChartBuilder::on(root);
    builder
        .margin(10)
        .margin_right(70)
        .x_label_area_size(36)
        .y_label_area_size(44);
    if let Some(title) = &layout.title {
        builder.caption(title, style.bold_font(style.title_font_pt));
    }
    let mut chart = builder.build_cartesian_2d(
        (x_lo..x_hi).log_scale().with_key_points(layout.ticks.clone()),
        (0f64..layout.y_top)
            .partial_axis(0f64..layout.y_top)
            .with_key_points(layout.y_ticks.major.clone()),
    )?;

    chart
        .configure_mesh()
        .x_labels(layout.ticks.len().max(1))
        .y_labels(layout.y_ticks.major.len().max(1))
        .x_label_formatter(&|v| ticks::tick_label(*v))
        .y_label_formatter(&|v| ticks::value_label(*v))
        .x_desc("stride")
        .y_desc(layout.y_desc.as_str())
        .axis_desc_style(style.bold_font(style.axis_font_pt))
        .label_style(style.bold_font(style.tick_font_pt))
        .bold_line_style(&BLACK.mix(0.15))
        .light_line_style(&TRANSPARENT)
        .set_tick_mark_size(LabelAreaPosition::Bottom, -4)
        .set_tick_mark_size(LabelAreaPosition::Left, -4)
        .draw()?;

    let (x_pixels, y_pixels) = chart.plotting_area().get_pixel_range();
    let minor_style = BLACK.stroke_width(1);
    for &x in &layout.minor_ticks {
        let (px, _) = chart.backend_coord(&(x, 0.0));
        root.draw(&PathElement::new(
            vec![(px, y_pixels.end), (px, y_pixels.end - MINOR_TICK_PX)],
            minor_style,
        ))?;
    }
    for &y in &layout.y_ticks.minor {
        let (_, py) = chart.backend_coord(&(x_lo, y));
        root.draw(&PathElement::new(
            vec![(x_pixels.start, py), (x_pixels.start + MINOR_TICK_PX, py)],
            minor_style,
        ))?;
    }

    for (index, series) in set.series.iter().enumerate() {
        let look = SeriesStyle::for_index(index);
        let line = look.color.stroke_width(1);
        let points = series.points.iter().copied();

        let anno = match look.dash.pattern() {
            None => chart.draw_series(LineSeries::new(points, line))?,
            Some((dash, gap)) => chart.draw_series(DashedLineSeries::new(points, dash, gap, line))?,
        };
        anno.label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 14, y)], line));

        chart.draw_series(
            series
                .points
                .iter()
                .map(|&p| Circle::new(p, 1, look.color.filled())),
        )?;
    }

    let axes_height = f64::from(y_pixels.end - y_pixels.start);
    let label_y = annotate::label_y(
        layout.y_top,
        axes_height,
        annotate::LABEL_OFFSET_PT,
        style.dpi,
    );

    for marker in &layout.cache_markers {
        let x = marker.bytes as f64;
        if x < x_lo {
            debug!(label = %marker.label, "cache marker left of the stride axis, skipped");
            continue;
        }
        chart.draw_series(DashedLineSeries::new(
            vec![(x, 0.0), (x, layout.y_top)],
            5,
            3,
            marker.color.stroke_width(1),
        ))?;
        chart.draw_series(std::iter::once(Text::new(
            marker.label.clone(),
            (x, label_y),
            style
                .font(style.marker_font_pt)
                .transform(FontTransform::Rotate270)
                .color(&marker.color),
        )))?;
    }

    let min = &layout.min_marker;
    chart.draw_series(DashedLineSeries::new(
        vec![(x_lo, min.value), (x_hi, min.value)],
        5,
        3,
        annotate::MIN_MARKER_COLOR.stroke_width(1),
    ))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE)
        .border_style(&TRANSPARENT)
        .label_font(style.font(style.legend_font_pt).color(&BLACK))
        .draw()?;

    // Past the right edge of the axes, outside the chart's clip region
    let (px, py) = chart.backend_coord(&(x_hi, min.value));
    root.draw(&Text::new(
        min.label.clone(),
        (px + 4, py),
        style
            .font(style.marker_font_pt)
            .color(&annotate::MIN_MARKER_COLOR)
            .pos(Pos::new(HPos::Left, VPos::Center)),
    ))?;

    debug!(
        column = %set.column,
        series = set.series.len(),
        ticks = layout.ticks.len(),
        cache_markers = layout.cache_markers.len(),
        "rendered chart"
    );
    Ok(())
}
