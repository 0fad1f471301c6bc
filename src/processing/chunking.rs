//! Chunk assembly policies.
//!
//! This module turns normalized text into the ordered chunk sequence handed
//! to the packager. Highlights:
//!
//! - Sentence mode packs whole sentences into an accumulator until the next
//!   sentence would push the chunk past its size bound; chunk boundaries
//!   never split a sentence.
//! - Window mode slides a fixed-size character window and extends each window
//!   end to the next sentence-terminal character so neighboring chunks share
//!   a configurable overlap without cutting mid-sentence.
//! - All sizes are counted in characters, not bytes, so multi-byte text is
//!   never sliced across a code point.

use super::segment::split_sentences;
use super::types::{ChunkPolicy, ChunkingError};

/// Characters a window end may scan past the nominal window size while
/// looking for a sentence boundary. Bounds the scan on pathological inputs
/// with no punctuation.
const BOUNDARY_SCAN_LIMIT: usize = 512;

/// Assemble normalized text into chunks under the given policy.
///
/// The policy is validated first; an impossible configuration fails before
/// any chunk is produced.
pub(crate) fn assemble_chunks(
    text: &str,
    policy: ChunkPolicy,
) -> Result<Vec<String>, ChunkingError> {
    policy.validate()?;
    Ok(match policy {
        ChunkPolicy::Sentence { max_size } => pack_sentences(text, max_size),
        ChunkPolicy::Window {
            chunk_size,
            overlap,
        } => split_with_overlap(text, chunk_size, overlap),
    })
}

/// Pack sentences into chunks of fewer than `max_size` characters.
///
/// Sentences inside a chunk are rejoined with single spaces. A lone sentence
/// that already exceeds `max_size` becomes its own oversized chunk; no
/// further splitting is attempted.
fn pack_sentences(text: &str, max_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();
        if current.is_empty() {
            current.push_str(sentence);
            current_len = sentence_len;
        } else if current_len + sentence_len + 1 < max_size {
            current.push(' ');
            current.push_str(sentence);
            current_len += sentence_len + 1;
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(sentence);
            current_len = sentence_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Split raw content into overlapping fixed-size windows.
///
/// Each window end is extended forward to the next `.`/`!`/`?`/newline (or
/// end of content), capped at [`BOUNDARY_SCAN_LIMIT`] extra characters; the
/// next window starts `overlap` characters before the previous end. The walk
/// stops once a window reaches the end of the content.
fn split_with_overlap(content: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = content.chars().collect();
    let total = chars.len();
    let mut chunks = Vec::new();
    let mut start = 0usize;

    while start < total {
        let mut end = (start + chunk_size).min(total);
        let scan_limit = (end + BOUNDARY_SCAN_LIMIT).min(total);
        while end < scan_limit && !is_sentence_terminal(chars[end]) {
            end += 1;
        }
        if end < total && is_sentence_terminal(chars[end]) {
            end += 1;
        }

        let chunk: String = chars[start..end].iter().collect();
        let chunk = chunk.trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        if end >= total {
            break;
        }
        start = end - overlap;
    }

    chunks
}

fn is_sentence_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '\n')
}
