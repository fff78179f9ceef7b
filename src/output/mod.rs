// Output formatting: terminal display of sentences, documents and topics.

pub mod terminal;

/// Shorten a topic name or sentence to `max_chars` characters for a table
/// column, marking the cut with "...". Counts chars, not bytes.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
