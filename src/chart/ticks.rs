//! Power-of-two tick placement for the stride axis.

use crate::units::format_bytes_or_raw;

/// Default number of ticks the adaptive strategy aims for
pub const DEFAULT_TARGET_TICKS: u32 = 12;

/// Labelled ticks the value axis aims for
pub const DEFAULT_VALUE_TICKS: usize = 8;

// Major value steps, as multiples of a power of ten
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// How far apart consecutive tick exponents are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStep {
    /// Always this many exponents apart (minimum 1)
    Fixed(u32),
    /// Spread the exponent range over roughly `target` ticks
    Adaptive {
        /// Desired tick count
        target: u32,
    },
}

impl Default for TickStep {
    fn default() -> Self {
        Self::Adaptive {
            target: DEFAULT_TARGET_TICKS,
        }
    }
}

impl TickStep {
    /// Exponent step for an axis whose largest exponent is `max_exponent`.
    ///
    /// The adaptive step is `max_exponent / target` rounded half up.
    #[must_use]
    pub fn exponent_step(self, max_exponent: u32) -> u32 {
        let step = match self {
            Self::Fixed(step) => step,
            Self::Adaptive { target } => {
                let target = target.max(1);
                (2 * max_exponent + target) / (2 * target)
            }
        };
        step.max(1)
    }
}

/// `floor(log2(value))`, 0 for values below 2.
#[must_use]
pub fn floor_log2(value: f64) -> u32 {
    if !value.is_finite() || value < 2.0 {
        return 0;
    }
    let whole = value.min(u64::MAX as f64) as u64;
    63 - whole.leading_zeros()
}

/// Tick locations `2^0, 2^step, ...` below `2^floor(log2(max_stride))`.
#[must_use]
pub fn stride_ticks(max_stride: f64, step: TickStep) -> Vec<u64> {
    let max_exponent = floor_log2(max_stride).min(63);
    let step = step.exponent_step(max_exponent);
    (0..max_exponent)
        .step_by(step as usize)
        .map(|e| 1u64 << e)
        .collect()
}

/// Label for a tick location
#[must_use]
pub fn tick_label(location: f64) -> String {
    format_bytes_or_raw(location.max(0.0).round() as u64)
}

/// Unlabelled powers of two inside `x_range` that are not in `major`.
#[must_use]
pub fn minor_stride_ticks(x_range: (f64, f64), major: &[f64]) -> Vec<f64> {
    let (lo, hi) = x_range;
    if !(lo > 0.0 && hi.is_finite() && hi >= lo) {
        return Vec::new();
    }
    let first = lo.log2().ceil() as i32;
    let last = hi.log2().floor().min(1023.0) as i32;
    (first..=last)
        .map(|e| 2f64.powi(e))
        .filter(|v| !major.contains(v))
        .collect()
}

/// Major and minor tick locations on the value axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTicks {
    /// Labelled locations, starting at 0
    pub major: Vec<f64>,
    /// Subdivisions between the labelled locations
    pub minor: Vec<f64>,
}

/// Ticks for a value axis spanning `0..=top`.
///
/// The major step is 1, 2, 2.5 or 5 times a power of ten, chosen so about
/// `target` steps fit. Steps with a mantissa of 2 or 2.5 are split into 4
/// minor intervals, the rest into 5.
#[must_use]
pub fn value_ticks(top: f64, target: usize) -> ValueTicks {
    if !(top.is_finite() && top > 0.0) {
        return ValueTicks {
            major: vec![0.0],
            minor: Vec::new(),
        };
    }
    let raw = top / target.max(1) as f64;
    // magnitude = num / den, both exact powers of ten
    let exponent = raw.log10().floor() as i32;
    let (num, den) = if exponent >= 0 {
        (10f64.powi(exponent), 1.0)
    } else {
        (1.0, 10f64.powi(-exponent))
    };
    let nice = NICE_STEPS
        .iter()
        .copied()
        .find(|s| s * num / den >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0);
    let divisions: usize = if nice == 2.0 || nice == 2.5 { 4 } else { 5 };
    let minor_step = nice * num / (divisions as f64 * den);
    let count = (top / minor_step + 1e-9).floor() as usize;

    let mut ticks = ValueTicks {
        major: Vec::new(),
        minor: Vec::new(),
    };
    for i in 0..=count {
        // One rounding per value keeps 0.6 equal to the literal 0.6
        let value = ((i as f64 * nice * num) / (divisions as f64 * den)).min(top);
        if i % divisions == 0 {
            ticks.major.push(value);
        } else {
            ticks.minor.push(value);
        }
    }
    ticks
}

/// Label for a value-axis tick, without float noise
#[must_use]
pub fn value_label(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    format!("{}", rounded + 0.0)
}
