// Pseudo-document builder: groups sentences into overlapping chunks.
//
// The grouping is purely positional. Walking the sentences by index `nr`:
//
//   nr % 4 == 0  -> the accumulator is cleared
//   nr % 5 == 2  -> the accumulator is emitted as a pseudo-document
//   otherwise    -> " " + sentence is appended to the accumulator
//
// The reset check runs before the emission check, so at nr % 20 == 12 the
// emitted document is always empty. Emission does not clear the accumulator,
// so text can show up again (lengthened) in a later document. The sentence at
// an emitting index is dropped.
//
// The rule looks like an experimental heuristic that may be accidental: the
// reset and emit periods differ, so chunks are uneven and overlap. Keep it
// exact anyway. Documents keep their leading space and are never trimmed.

/// Build pseudo-documents from an ordered list of sentences.
///
/// Returns one document per index `nr` in `0..sentences.len()` with
/// `nr % 5 == 2`, in emission order. Each document is either empty or starts
/// with a single space.
pub fn build_pseudo_documents<S: AsRef<str>>(sentences: &[S]) -> Vec<String> {
    let mut documents = Vec::with_capacity(expected_document_count(sentences.len()));
    let mut acc = String::new();

    for (nr, sentence) in sentences.iter().enumerate() {
        if nr % 4 == 0 {
            acc.clear();
        }
        if nr % 5 == 2 {
            documents.push(acc.clone());
        } else {
            acc.push(' ');
            acc.push_str(sentence.as_ref());
        }
    }

    documents
}

/// Number of documents `build_pseudo_documents` emits for `n` sentences.
pub fn expected_document_count(n: usize) -> usize {
    // Indices 2, 7, 12, ... below n
    if n <= 2 {
        0
    } else {
        (n - 3) / 5 + 1
    }
}
