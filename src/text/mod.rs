//! Shared text utilities: normalization, word chunking, sentence splitting
//!
//! Every analysis stage works on text that went through [`normalize`] first,
//! except action-item extraction, which matches against the raw transcript.

use crate::{RecapError, Result};

fn keep_in_normalized(c: char) -> bool {
    c.is_alphanumeric()
        || c == '_'
        || c.is_whitespace()
        || matches!(c, '.' | '!' | '?' | ',' | ';' | ':' | '-' | '(' | ')')
}

/// Normalize a transcript for analysis.
///
/// Collapses whitespace runs to a single space, then strips characters
/// outside word characters, whitespace and sentence punctuation
/// (`.!?,;:-()`), then trims the ends. Total function: never fails, empty
/// input gives empty output.
pub fn normalize(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
                in_whitespace = true;
            }
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }

    let stripped: String = collapsed.chars().filter(|&c| keep_in_normalized(c)).collect();
    stripped.trim().to_string()
}

/// Split text into chunks of at most `max_words` whitespace-delimited words.
///
/// Every chunk holds exactly `max_words` words except possibly the last one,
/// which holds the remainder. Input order is preserved. Empty text yields an
/// empty vec.
pub fn split_words(text: &str, max_words: usize) -> Result<Vec<String>> {
    if max_words == 0 {
        return Err(RecapError::InvalidArgument(
            "max_words must be greater than zero".to_string(),
        ));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let chunks = words
        .chunks(max_words)
        .map(|chunk| chunk.join(" "))
        .collect();

    Ok(chunks)
}

/// Count whitespace-delimited words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split text into sentences at `.`, `!` or `?` boundaries.
///
/// Consecutive terminators count as one boundary. Sentences are trimmed and
/// empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
