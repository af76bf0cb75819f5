//! Keyword tokenization shared by index construction and query parsing.
//!
//! Both sides must tokenize identically or index hits become asymmetric, so
//! this is the only tokenizer in the crate.

/// Common words removed before matching
const STOP_WORDS: [&str; 11] = [
    "the", "a", "an", "and", "or", "is", "in", "to", "of", "for", "with",
];

/// Minimum token length kept by the tokenizer
const MIN_TOKEN_CHARS: usize = 3;

/// Lowercase word-boundary tokenization.
///
/// Splits on any character outside `[A-Za-z0-9_]`, then drops stop words and
/// tokens shorter than three characters. Order follows the input text;
/// duplicates are preserved (callers that need distinct tokens dedupe).
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(|token| token.to_string())
        .collect()
}
