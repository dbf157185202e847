//! Binary byte-size formatting and parsing.
//!
//! Labels in the charts are always whole numbers in the largest binary unit
//! that keeps the value at or above 1, e.g. `1536` bytes is `"1 KB"`.

use crate::error::{PlotError, Result};

/// 2^10
pub const KIB: u64 = 1 << 10;
/// 2^20
pub const MIB: u64 = 1 << 20;
/// 2^30
pub const GIB: u64 = 1 << 30;
/// 2^40, first value the formatter has no unit for
pub const TIB: u64 = 1 << 40;

const UNITS: [(u64, &str); 4] = [(GIB, "GB"), (MIB, "MB"), (KIB, "KB"), (1, "B")];

/// Format a byte count using B/KB/MB/GB, truncating to an integer.
///
/// Returns `None` for counts of 2^40 and above.
///
/// # Examples
///
/// ```
/// use membench_plot::units::format_bytes;
///
/// assert_eq!(format_bytes(1023).as_deref(), Some("1023 B"));
/// assert_eq!(format_bytes(1024).as_deref(), Some("1 KB"));
/// assert_eq!(format_bytes(3 * 1024 * 1024 + 5).as_deref(), Some("3 MB"));
/// assert_eq!(format_bytes(1 << 40), None);
/// ```
#[must_use]
pub fn format_bytes(bytes: u64) -> Option<String> {
    if bytes >= TIB {
        return None;
    }
    UNITS
        .iter()
        .find(|(scale, _)| bytes >= *scale)
        .map(|(scale, unit)| format!("{} {unit}", bytes / scale))
        .or_else(|| Some("0 B".to_string()))
}

/// Format a byte count, falling back to a raw byte count when the value is
/// past the largest supported unit.
#[must_use]
pub fn format_bytes_or_raw(bytes: u64) -> String {
    format_bytes(bytes).unwrap_or_else(|| format!("{bytes} B"))
}

/// Parse a size such as `4096`, `32K`, `256KB` or `6M` into bytes.
///
/// Suffixes are case-insensitive binary multiples.
///
/// # Errors
///
/// Returns [`PlotError::InvalidConfig`] when the number or suffix is not
/// recognised, or when the result overflows `u64`.
pub fn parse_size(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, suffix) = trimmed.split_at(split);

    let value: u64 = digits
        .parse()
        .map_err(|_| PlotError::InvalidConfig(format!("invalid size '{text}'")))?;

    let scale = match suffix.trim().to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" | "KB" | "KIB" => KIB,
        "M" | "MB" | "MIB" => MIB,
        "G" | "GB" | "GIB" => GIB,
        other => {
            return Err(PlotError::InvalidConfig(format!(
                "unknown size suffix '{other}' in '{text}'"
            )))
        }
    };

    value
        .checked_mul(scale)
        .ok_or_else(|| PlotError::InvalidConfig(format!("size '{text}' overflows")))
}
