//! Reference markers drawn over the series: cache capacities and the
//! minimum observed latency.

use crate::units::{format_bytes_or_raw, KIB, MIB};
use plotters::style::RGBColor;

/// Default L1/L2/L3 capacities in bytes
pub const DEFAULT_CACHE_SIZES: [u64; 3] = [32 * KIB, 256 * KIB, 6 * MIB];

/// Distance of the cache labels below the top of the axes, in points
pub const LABEL_OFFSET_PT: f64 = 54.0;

const CACHE_COLORS: [RGBColor; 3] = [
    RGBColor(0, 128, 0),   // green
    RGBColor(0, 0, 255),   // blue
    RGBColor(255, 165, 0), // orange
];

/// Colour of the minimum-latency marker
pub const MIN_MARKER_COLOR: RGBColor = RGBColor(165, 42, 42);

/// A vertical line at a cache capacity
#[derive(Debug, Clone, PartialEq)]
pub struct CacheMarker {
    /// Capacity in bytes, also the x position
    pub bytes: u64,
    /// e.g. "L2 Cache = 256 KB"
    pub label: String,
    /// Line and label colour
    pub color: RGBColor,
}

/// A horizontal line at the minimum measured value
#[derive(Debug, Clone, PartialEq)]
pub struct MinMarker {
    /// Minimum value in ns, also the y position
    pub value: f64,
    /// e.g. "min = 2.1 ns"
    pub label: String,
}

/// Markers for every cache capacity strictly below `max_stride`.
///
/// Levels are named by position: the first size is L1.
#[must_use]
pub fn cache_markers(cache_sizes: &[u64], max_stride: f64) -> Vec<CacheMarker> {
    cache_sizes
        .iter()
        .enumerate()
        .filter(|(_, &bytes)| (bytes as f64) < max_stride)
        .map(|(level, &bytes)| CacheMarker {
            bytes,
            label: format!("L{} Cache = {}", level + 1, format_bytes_or_raw(bytes)),
            color: CACHE_COLORS[level % CACHE_COLORS.len()],
        })
        .collect()
}

/// Marker for the minimum latency, labelled to 3 decimal places.
#[must_use]
pub fn min_marker(min_value: f64) -> MinMarker {
    MinMarker {
        value: min_value,
        label: format!("min = {} ns", round3(min_value)),
    }
}

/// Round to 3 decimals, dropping trailing zeros on display.
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Data-space y for a label sitting `offset_pt` below the top of the axes.
///
/// The y axis starts at zero, so the offset scales linearly with the axes'
/// pixel height.
#[must_use]
pub fn label_y(y_top: f64, axes_height_px: f64, offset_pt: f64, dpi: f64) -> f64 {
    if axes_height_px <= 0.0 {
        return y_top;
    }
    let offset_px = offset_pt * dpi / 72.0;
    (y_top * (axes_height_px - offset_px) / axes_height_px).max(0.0)
}
