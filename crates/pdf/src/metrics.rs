use md2pdf_core::{Font, TextStyle};

use crate::types::MM_TO_PT;

/// Advance widths (1/1000 em) for WinAnsi codes 32..=126, from the Adobe
/// core-14 AFM files.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const COURIER_WIDTH: u16 = 600;

/// Used for codes outside the printable ASCII range.
const FALLBACK_WIDTH: u16 = 556;

/// Advance width of one WinAnsi byte in 1/1000 em.
pub fn byte_width(font: Font, byte: u8) -> u16 {
    let table = match font {
        Font::Courier => return COURIER_WIDTH,
        Font::Helvetica => &HELVETICA,
        Font::HelveticaBold => &HELVETICA_BOLD,
    };
    match byte {
        32..=126 => table[(byte - 32) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width in millimetres of one byte drawn with `style`.
pub fn byte_width_mm(style: TextStyle, byte: u8) -> f32 {
    f32::from(byte_width(style.font, byte)) * style.size / 1000.0 / MM_TO_PT
}

/// Width in millimetres of an encoded string drawn with `style`.
pub fn string_width(style: TextStyle, bytes: &[u8]) -> f32 {
    bytes.iter().map(|&b| byte_width_mm(style, b)).sum()
}

/// Font size in millimetres.
pub fn size_mm(style: TextStyle) -> f32 {
    style.size / MM_TO_PT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        assert_eq!(byte_width(Font::Helvetica, b' '), 278);
        assert_eq!(byte_width(Font::Helvetica, b'A'), 667);
        assert_eq!(byte_width(Font::Helvetica, b'i'), 222);
        assert_eq!(byte_width(Font::Helvetica, b'~'), 584);
        assert_eq!(byte_width(Font::HelveticaBold, b'b'), 611);
        assert_eq!(byte_width(Font::HelveticaBold, b'@'), 975);
    }

    #[test]
    fn test_courier_is_monospaced() {
        assert_eq!(byte_width(Font::Courier, b'i'), 600);
        assert_eq!(byte_width(Font::Courier, b'M'), 600);
        assert_eq!(byte_width(Font::Courier, 0xE9), 600);
    }

    #[test]
    fn test_string_width_scales_with_size() {
        let small = TextStyle::new(Font::Helvetica, 10.0);
        let large = TextStyle::new(Font::Helvetica, 20.0);
        let w_small = string_width(small, b"hello");
        let w_large = string_width(large, b"hello");
        assert!((w_large - 2.0 * w_small).abs() < 0.001);
    }

    #[test]
    fn test_string_width_value() {
        // 10 Courier characters at 12pt: 10 * 0.6 * 12pt = 72pt = 25.4mm.
        let style = TextStyle::new(Font::Courier, 12.0);
        assert!((string_width(style, b"0123456789") - 25.4).abs() < 0.01);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = TextStyle::new(Font::Helvetica, 9.0);
        let bold = TextStyle::new(Font::HelveticaBold, 9.0);
        assert!(string_width(bold, b"bold text") > string_width(regular, b"bold text"));
    }
}
