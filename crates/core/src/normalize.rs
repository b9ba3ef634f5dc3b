use std::sync::OnceLock;

use regex::Regex;

/// Typographic characters the core PDF fonts may not carry, with their ASCII
/// stand-ins.
const REPLACEMENTS: [(char, &str); 9] = [
    ('\u{2013}', "-"),   // en-dash
    ('\u{2014}', "--"),  // em-dash
    ('\u{2018}', "'"),   // left single quote
    ('\u{2019}', "'"),   // right single quote
    ('\u{201C}', "\""),  // left double quote
    ('\u{201D}', "\""),  // right double quote
    ('\u{2022}', "*"),   // bullet
    ('\u{2026}', "..."), // ellipsis
    ('\u{00A0}', " "),   // non-breaking space
];

/// Strip Markdown emphasis and replace typographic Unicode with ASCII.
///
/// Bold (`**x**`), italic (`*x*`) and inline code (`` `x` ``) markers are
/// removed in that order, each matching the shortest enclosed span from left
/// to right. Text without markers passes through unchanged.
pub fn normalize(text: &str) -> String {
    static RE_BOLD: OnceLock<Regex> = OnceLock::new();
    static RE_ITALIC: OnceLock<Regex> = OnceLock::new();
    static RE_CODE: OnceLock<Regex> = OnceLock::new();

    let re_bold = RE_BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
    let re_italic = RE_ITALIC.get_or_init(|| Regex::new(r"\*(.*?)\*").unwrap());
    let re_code = RE_CODE.get_or_init(|| Regex::new(r"`(.*?)`").unwrap());

    let result = re_bold.replace_all(text, "$1");
    let result = re_italic.replace_all(&result, "$1");
    let result = re_code.replace_all(&result, "$1");

    let mut output = String::with_capacity(result.len());
    for c in result.chars() {
        match REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => output.push_str(to),
            None => output.push(c),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_ascii_passthrough() {
        let text = "Plain text, with punctuation: 1 + 2 = 3 (really) - ok!";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn test_strips_all_emphasis_kinds() {
        assert_eq!(
            normalize("**bold** and *italic* and `code`"),
            "bold and italic and code"
        );
    }

    #[test]
    fn test_non_greedy_bold() {
        assert_eq!(normalize("**a** b **c**"), "a b c");
    }

    #[test]
    fn test_unmatched_marker_is_kept() {
        assert_eq!(normalize("5 * 3"), "5 * 3");
        assert_eq!(normalize("a `tick"), "a `tick");
    }

    #[test]
    fn test_bold_inside_italic_order() {
        // Bold goes first, so the remaining single stars pair up afterwards.
        assert_eq!(normalize("***both***"), "both");
    }

    #[test]
    fn test_typographic_replacements() {
        assert_eq!(
            normalize("a\u{2013}b\u{2014}c \u{201C}q\u{201D} \u{2018}s\u{2019}"),
            "a-b--c \"q\" 's'"
        );
        assert_eq!(normalize("wait\u{2026}"), "wait...");
        assert_eq!(normalize("\u{2022} item"), "* item");
        assert_eq!(normalize("a\u{00A0}b"), "a b");
    }

    #[test]
    fn test_other_unicode_untouched() {
        assert_eq!(normalize("café"), "café");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
    }
}
