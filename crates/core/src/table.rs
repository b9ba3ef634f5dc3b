use std::sync::OnceLock;

use regex::Regex;

/// Returns true for header/body separator rows such as `|---|:--:|`.
pub fn is_separator_row(line: &str) -> bool {
    static RE_SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let re = RE_SEPARATOR.get_or_init(|| Regex::new(r"^\|[-:\s|]+\|$").unwrap());
    re.is_match(line)
}

/// Parse contiguous pipe-table lines into rows of trimmed cells.
///
/// Separator rows are dropped. Each remaining line is split on `|` and the
/// fields outside the outer pipes are discarded. Rows keep whatever length
/// they were written with; see [`fit_row`] for the rendering policy.
pub fn parse_table(lines: &[&str]) -> Vec<Vec<String>> {
    lines
        .iter()
        .filter(|line| line.starts_with('|') && !is_separator_row(line))
        .map(|line| {
            let fields: Vec<&str> = line.split('|').collect();
            let inner = if fields.len() > 2 {
                &fields[1..fields.len() - 1]
            } else {
                &[][..]
            };
            inner.iter().map(|cell| cell.trim().to_string()).collect()
        })
        .collect()
}

/// Conform a row to `columns` cells: missing cells become empty strings,
/// extra cells are dropped.
pub fn fit_row(row: &[String], columns: usize) -> Vec<String> {
    let mut fitted: Vec<String> = row.iter().take(columns).cloned().collect();
    fitted.resize(columns, String::new());
    fitted
}

/// Keep at most `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_parse_table_drops_separator() {
        let rows = parse_table(&["|A|B|", "|---|---|", "|1|2|"]);
        assert_eq!(rows, vec![row(&["A", "B"]), row(&["1", "2"])]);
    }

    #[test]
    fn test_parse_table_trims_cells() {
        let rows = parse_table(&["| Name | Age |", "| :--- | ---: |", "|  Alice  | 30 |"]);
        assert_eq!(rows, vec![row(&["Name", "Age"]), row(&["Alice", "30"])]);
    }

    #[test]
    fn test_parse_table_keeps_ragged_rows() {
        let rows = parse_table(&["|A|B|C|", "|1|", "|1|2|3|4|"]);
        assert_eq!(rows[1], row(&["1"]));
        assert_eq!(rows[2], row(&["1", "2", "3", "4"]));
    }

    #[test]
    fn test_parse_table_missing_trailing_pipe_drops_last_field() {
        let rows = parse_table(&["|A|B"]);
        assert_eq!(rows, vec![row(&["A"])]);
    }

    #[test]
    fn test_parse_table_lone_pipe_has_no_cells() {
        let rows = parse_table(&["|"]);
        assert_eq!(rows, vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_parse_table_keeps_empty_cells() {
        let rows = parse_table(&["||x|"]);
        assert_eq!(rows, vec![row(&["", "x"])]);
    }

    #[test]
    fn test_separator_variants() {
        assert!(is_separator_row("|---|---|"));
        assert!(is_separator_row("|:--:|--:|"));
        assert!(is_separator_row("| --- | --- |"));
        assert!(!is_separator_row("|-a-|"));
        assert!(!is_separator_row("||"));
    }

    #[test]
    fn test_fit_row_pads_and_truncates() {
        assert_eq!(fit_row(&row(&["a"]), 3), row(&["a", "", ""]));
        assert_eq!(fit_row(&row(&["a", "b", "c"]), 2), row(&["a", "b"]));
        assert_eq!(fit_row(&row(&["a", "b"]), 2), row(&["a", "b"]));
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }
}
