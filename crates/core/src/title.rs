use crate::normalize::normalize;

/// Pick the document title shown in every page header.
///
/// An explicit title wins, then the first `# ` line anywhere in the source,
/// then `fallback` (the input file stem). The result is normalized.
pub fn derive_title(source: &str, explicit: Option<&str>, fallback: &str) -> String {
    let raw = explicit
        .or_else(|| first_top_level_heading(source))
        .unwrap_or(fallback);
    normalize(raw)
}

fn first_top_level_heading(source: &str) -> Option<&str> {
    source
        .lines()
        .filter_map(|line| line.strip_prefix("# "))
        .find(|text| !text.is_empty())
}
