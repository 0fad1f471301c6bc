//! Sentence segmentation over normalized text.
//!
//! Segmentation is a deliberate simplification: a break happens after every
//! `". "`, `"! "`, `"? "` occurrence, with the delimiter space consumed and
//! the terminal punctuation retained. Abbreviations and decimal numbers
//! over-split; no NLP boundary model is involved.

/// Split normalized text into ordered sentence-like units.
///
/// The final remainder (no trailing terminal + space) is still emitted when
/// non-empty. No returned unit is empty after trimming.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') && bytes.get(i + 1) == Some(&b' ') {
            let sentence = text[start..=i].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            // the delimiter space is consumed, not retained
            start = i + 2;
            i = start;
        } else {
            i += 1;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }

    sentences
}
