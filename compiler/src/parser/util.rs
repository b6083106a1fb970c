//! Brace-aware string scanning shared by the token and signature parsers.

/// Returns the byte index of the first `needle` that is not inside a
/// `{...}` group.
///
/// Unbalanced closing braces are ignored rather than driving the depth
/// negative.
pub fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            _ if ch == needle && depth == 0 => return Some(idx),
            _ => {}
        }
    }
    None
}

/// Splits `text` around the first top-level `needle`.
pub fn split_top_level(text: &str, needle: char) -> Option<(&str, &str)> {
    let idx = find_top_level(text, needle)?;
    Some((&text[..idx], &text[idx + needle.len_utf8()..]))
}
