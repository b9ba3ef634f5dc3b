use unicode_normalization::UnicodeNormalization;

/// Byte written for characters WinAnsi cannot represent.
pub const REPLACEMENT: u8 = b'?';

const TAB_WIDTH: usize = 4;

/// WinAnsi codes 0x80..=0x9F that differ from Latin-1.
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Text encoded for the standard Type1 fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// How many characters were replaced with [`REPLACEMENT`].
    pub substituted: usize,
}

fn encode_char(c: char) -> Option<u8> {
    match c {
        ' '..='~' | '\u{00A0}'..='\u{00FF}' => Some(c as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(from, _)| *from == c)
            .map(|(_, code)| *code),
    }
}

/// Encode text as WinAnsi after NFC composition.
///
/// Tabs expand to spaces; anything else without a WinAnsi code becomes `?`.
pub fn encode_win_ansi(text: &str) -> Encoded {
    let mut bytes = Vec::with_capacity(text.len());
    let mut substituted = 0;

    for c in text.nfc() {
        if c == '\t' {
            bytes.extend_from_slice(&[b' '; TAB_WIDTH]);
            continue;
        }
        match encode_char(c) {
            Some(b) => bytes.push(b),
            None => {
                bytes.push(REPLACEMENT);
                substituted += 1;
            }
        }
    }

    Encoded { bytes, substituted }
}
