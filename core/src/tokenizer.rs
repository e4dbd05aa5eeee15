use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

use crate::Error;

lazy_static! {
    static ref PUNCT: Regex = Regex::new(r"[[:punct:]]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// Normalize text into match-ready tokens: NFKC fold, lowercase, ASCII
/// punctuation deleted in place ("don't" becomes "dont", not "don t"), split
/// on whitespace runs, optional stopword removal, then stemming.
///
/// Order-preserving and without deduplication. Documents at build time and
/// queries at search time must go through this same function; matching breaks
/// if the two paths ever diverge.
pub fn normalize(text: &str, stopwords: Option<&HashSet<String>>) -> Vec<String> {
    let folded = text.nfkc().collect::<String>().to_lowercase();
    let stripped = PUNCT.replace_all(&folded, "");
    stripped
        .split_whitespace()
        .filter(|t| stopwords.map_or(true, |set| !set.contains(*t)))
        .map(|t| STEMMER.stem(t).to_string())
        .collect()
}

/// Normalize input that must reduce to exactly one token (term-frequency and
/// scoring lookups). Phrases, and inputs that normalize away entirely, are
/// rejected rather than silently truncated.
pub fn normalize_term(term: &str) -> Result<String, Error> {
    let mut tokens = normalize(term, None);
    if tokens.len() != 1 {
        return Err(Error::InvalidArgument(format!(
            "expected a single token, got {} from {term:?}",
            tokens.len()
        )));
    }
    Ok(tokens.remove(0))
}
