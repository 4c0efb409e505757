//! Character-count line wrapping.
//!
//! There are no font metrics here, so wrapping is purely by character index:
//! word boundaries and whitespace are not considered.

/// Split `text` into chunks of exactly `max_length` characters (the last may
/// be shorter). A `max_length` of 0, or text that already fits, yields the
/// text unchanged as a single chunk.
pub fn chunk_text(text: &str, max_length: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if max_length == 0 || chars.len() <= max_length {
        return vec![text.to_string()];
    }

    chars
        .chunks(max_length)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Line break that leaves a visible gap of `line_spacing` pixels.
///
/// libass ignores style-level spacing on `\N`, so the break is followed by a
/// hard space on its own line rendered at `\fs<line_spacing>`, after which the
/// style is reset.
pub fn spaced_line_break(line_spacing: u32) -> String {
    format!("\\N{{\\r\\fs{}}}\\h\\N{{\\r}}", line_spacing)
}

/// Wrap with [`spaced_line_break`] between chunks.
pub fn wrap_with_spacing(text: &str, max_length: usize, line_spacing: u32) -> String {
    chunk_text(text, max_length).join(&spaced_line_break(line_spacing))
}

/// Wrap with bare `\N` breaks.
pub fn wrap_plain(text: &str, max_length: usize) -> String {
    chunk_text(text, max_length).join("\\N")
}
