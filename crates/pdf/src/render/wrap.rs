/// Split encoded text into lines no wider than `max_width`.
///
/// Lines break at the last space that still fits; the space itself is
/// dropped. A word wider than the whole line is cut mid-word, keeping at
/// least one byte per line. Empty input yields a single empty line.
pub fn wrap_bytes<F>(text: &[u8], max_width: f32, width_of: F) -> Vec<&[u8]>
where
    F: Fn(u8) -> f32,
{
    let mut lines = Vec::new();
    let mut start = 0;
    let mut separator: Option<usize> = None;
    let mut width = 0.0;
    let mut i = 0;

    while i < text.len() {
        let byte = text[i];
        if byte == b' ' {
            separator = Some(i);
        }
        width += width_of(byte);

        if width > max_width {
            match separator {
                Some(sep) => {
                    lines.push(&text[start..sep]);
                    start = sep + 1;
                }
                None => {
                    let end = if i == start { i + 1 } else { i };
                    lines.push(&text[start..end]);
                    start = end;
                }
            }
            i = start;
            separator = None;
            width = 0.0;
            continue;
        }
        i += 1;
    }

    if start < text.len() || lines.is_empty() {
        lines.push(&text[start..]);
    }
    lines
}
