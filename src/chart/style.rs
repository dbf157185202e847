//! Figure geometry, fonts and the per-series palette.

use plotters::style::{FontDesc, FontFamily, FontStyle, RGBColor};

/// Dash pattern of a series line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDash {
    /// Continuous line
    Solid,
    /// Long dashes
    Dashed,
    /// Short dashes with wide gaps
    Dotted,
}

impl LineDash {
    /// `(dash, gap)` in pixels, `None` for solid lines
    #[must_use]
    pub fn pattern(self) -> Option<(i32, i32)> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some((6, 3)),
            Self::Dotted => Some((1, 3)),
        }
    }
}

const DASHES: [LineDash; 3] = [LineDash::Solid, LineDash::Dashed, LineDash::Dotted];

// tab10
const COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Look of the series at position `index`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    /// Line and marker colour
    pub color: RGBColor,
    /// Dash pattern
    pub dash: LineDash,
}

impl SeriesStyle {
    /// Dash cycles every 3 series, colour every 10.
    #[must_use]
    pub fn for_index(index: usize) -> Self {
        Self {
            color: COLORS[index % COLORS.len()],
            dash: DASHES[index % DASHES.len()],
        }
    }
}

/// Page geometry and font sizes; sizes are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Figure width in inches
    pub width_in: f64,
    /// Figure height in inches
    pub height_in: f64,
    /// Canvas pixels per inch
    pub dpi: f64,
    /// Tick label size
    pub tick_font_pt: f64,
    /// Axis title size
    pub axis_font_pt: f64,
    /// Legend entry size
    pub legend_font_pt: f64,
    /// Cache and minimum marker label size
    pub marker_font_pt: f64,
    /// Page title size (multi-column documents)
    pub title_font_pt: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width_in: 6.4,
            height_in: 4.8,
            dpi: 100.0,
            tick_font_pt: 6.0,
            axis_font_pt: 10.0,
            legend_font_pt: 4.0,
            marker_font_pt: 5.0,
            title_font_pt: 10.0,
        }
    }
}

impl ChartStyle {
    /// Canvas size in pixels
    #[must_use]
    pub fn canvas_px(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round() as u32,
            (self.height_in * self.dpi).round() as u32,
        )
    }

    /// Convert points to canvas pixels
    #[must_use]
    pub fn px(&self, pt: f64) -> f64 {
        pt * self.dpi / 72.0
    }

    /// Regular sans-serif font at `pt` points
    #[must_use]
    pub fn font(&self, pt: f64) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, self.px(pt), FontStyle::Normal)
    }

    /// Bold sans-serif font at `pt` points
    #[must_use]
    pub fn bold_font(&self, pt: f64) -> FontDesc<'static> {
        FontDesc::new(FontFamily::SansSerif, self.px(pt), FontStyle::Bold)
    }
}
