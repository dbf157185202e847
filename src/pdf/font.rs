//! Helvetica metrics and WinAnsi text encoding for the standard fonts.
//!
//! Widths are the standard Type 1 advance widths in 1/1000 em.

/// Baseline to top of the em box, in em
pub const ASCENT: f64 = 0.77;
/// Baseline to bottom of the em box, in em
pub const DESCENT: f64 = 0.23;

const BOLD_FACTOR: f64 = 1.05;
const FALLBACK_WIDTH: u16 = 556;

// ASCII 32..=126
const WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

fn char_width(c: char) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        WIDTHS[(code - 32) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Advance width of `text` in em units.
#[must_use]
pub fn text_width_em(text: &str, bold: bool) -> f64 {
    let total: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    let width = f64::from(total) / 1000.0;
    if bold {
        width * BOLD_FACTOR
    } else {
        width
    }
}

/// Byte substituted for characters WinAnsiEncoding cannot show
pub const REPLACEMENT: u8 = b'?';

// Code points of WinAnsi bytes 0x80..=0x9F; 0 marks an unused byte
const WIN_ANSI_HIGH: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, // 0x80
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017D, 0, // 0x88
    0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, // 0x90
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178, // 0x98
];

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => u8::try_from(code).ok(),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|&mapped| mapped != 0 && u32::from(mapped) == code)
            .and_then(|i| u8::try_from(0x80 + i).ok()),
    }
}

/// Encode `text` for a font declared with `/Encoding /WinAnsiEncoding`.
///
/// Characters outside the encoding, control characters included, become `?`.
#[must_use]
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(REPLACEMENT))
        .collect()
}

/// Decode a WinAnsi string operand back to text.
#[must_use]
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0x9F => char::from_u32(u32::from(WIN_ANSI_HIGH[usize::from(b - 0x80)]))
                .filter(|c| *c != '\0')
                .unwrap_or(char::REPLACEMENT_CHARACTER),
            _ => char::from(b),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_width() {
        assert!((text_width_em("0", false) - 0.556).abs() < 1e-9);
        assert!((text_width_em("1024", false) - 4.0 * 0.556).abs() < 1e-9);
    }

    #[test]
    fn test_table_alignment() {
        assert_eq!(char_width(' '), 278);
        assert_eq!(char_width('@'), 1015);
        assert_eq!(char_width('M'), 833);
        assert_eq!(char_width('Z'), 611);
        assert_eq!(char_width('`'), 333);
        assert_eq!(char_width('m'), 833);
        assert_eq!(char_width('z'), 500);
        assert_eq!(char_width('~'), 584);
    }

    #[test]
    fn test_bold_is_wider() {
        assert!(text_width_em("L1 Cache", true) > text_width_em("L1 Cache", false));
    }

    #[test]
    fn test_win_ansi_latin1_and_high_range() {
        assert_eq!(encode_win_ansi("lat_\u{b5}s"), b"lat_\xb5s".to_vec());
        assert_eq!(encode_win_ansi("\u{20ac}\u{2013}"), vec![0x80, 0x96]);
        assert_eq!(encode_win_ansi("caf\u{e9}"), vec![b'c', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_win_ansi_unmappable_is_replaced() {
        assert_eq!(encode_win_ansi("\u{3bc}s"), b"?s".to_vec());
        assert_eq!(encode_win_ansi("a\tb"), b"a?b".to_vec());
    }

    #[test]
    fn test_win_ansi_decode() {
        assert_eq!(decode_win_ansi(b"lat_\xb5s"), "lat_\u{b5}s");
        assert_eq!(decode_win_ansi(&[0x80, b'1']), "\u{20ac}1");
        assert_eq!(decode_win_ansi(&[0x81]), "\u{fffd}");
    }

    #[test]
    fn test_non_ascii_fallback() {
        assert!((text_width_em("\u{b5}", false) - 0.556).abs() < 1e-9);
        assert_eq!(text_width_em("", false), 0.0);
    }
}
