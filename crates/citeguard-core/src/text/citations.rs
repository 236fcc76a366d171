//! Bracketed citation markers of the form `[C<digits>]`.

/// Returns citation ids (`"C12"`) in first-occurrence order, without duplicates.
///
/// A `[` that does not start a complete marker advances the scan by one
/// position only.
pub fn extract_citations(text: &str) -> Vec<String> {
    let mut citations: Vec<String> = Vec::new();
    let mut i = 0;
    while i < text.len() {
        match marker_at(text, i) {
            Some(end) => {
                let id = &text[i + 1..end - 1];
                if !citations.iter().any(|c| c == id) {
                    citations.push(id.to_string());
                }
                i = end;
            }
            None => i += 1,
        }
    }
    citations
}

/// Removes every citation marker from `text`.
pub fn strip_citation_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    let mut copied = 0;
    while i < text.len() {
        match marker_at(text, i) {
            Some(end) => {
                out.push_str(&text[copied..i]);
                i = end;
                copied = end;
            }
            None => i += 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Counts literal, non-overlapping occurrences of `[id]` in `text`.
pub fn count_marker(text: &str, id: &str) -> usize {
    text.matches(&format!("[{id}]")).count()
}

/// If a complete marker starts at byte `start`, returns the byte index just
/// past its closing bracket.
fn marker_at(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(start) != Some(&b'[') || bytes.get(start + 1) != Some(&b'C') {
        return None;
    }
    let digits = bytes[start + 2..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let close = start + 2 + digits;
    if digits > 0 && bytes.get(close) == Some(&b']') {
        Some(close + 1)
    } else {
        None
    }
}
