//! Conversions between LSP positions (UTF-16 code units) and Rust string offsets.

/// Byte index in `line` of the UTF-16 column `utf16_col`.
///
/// Returns `None` past the end of the line or inside a surrogate pair.
pub fn utf16_pos_to_byte_index(line: &str, utf16_col: usize) -> Option<usize> {
    let mut col = 0usize;

    for (byte_idx, ch) in line.char_indices() {
        if col == utf16_col {
            return Some(byte_idx);
        }
        if col > utf16_col {
            return None;
        }
        col += ch.len_utf16();
    }

    (col == utf16_col).then_some(line.len())
}

/// UTF-16 column of the byte index `byte_idx` in `line`, clamped to the line end.
pub fn byte_index_to_utf16_col(line: &str, byte_idx: usize) -> usize {
    line.char_indices()
        .take_while(|(idx, _)| *idx < byte_idx)
        .map(|(_, ch)| ch.len_utf16())
        .sum()
}

/// Line and UTF-16 column just past the last character of `content`.
pub fn document_end(content: &str) -> (u32, u32) {
    if content.is_empty() || content.ends_with('\n') {
        return (content.lines().count() as u32, 0);
    }
    let last_line = content.lines().last().unwrap_or("");
    let line = content.lines().count().saturating_sub(1);
    (
        line as u32,
        byte_index_to_utf16_col(last_line, last_line.len()) as u32,
    )
}
