// Sentence splitting on Unicode sentence boundaries (UAX #29).
//
// Segmentation itself is delegated to `unicode-segmentation`. UAX #29 breaks
// after every line feed, so whitespace runs are collapsed to one space before
// segmenting; otherwise wrapped prose would be cut mid-sentence. Segments are
// trimmed and blank ones dropped.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Split a block of text into trimmed, non-empty sentences in reading order.
pub fn split_sentences(text: &str) -> Vec<String> {
    let flattened = normalize_whitespace(text);
    let sentences: Vec<String> = flattened
        .unicode_sentences()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    debug!(
        sentences = sentences.len(),
        bytes = text.len(),
        "Split text into sentences"
    );

    sentences
}

/// Collapse whitespace runs to one space and trim both ends.
pub fn normalize_whitespace(segment: &str) -> String {
    WHITESPACE_RUN.replace_all(segment.trim(), " ").into_owned()
}
