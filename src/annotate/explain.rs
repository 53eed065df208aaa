//! Deduplicated explanation rows for the corrections panel.

use std::collections::HashSet;

use super::dictionary::Suggestion;
use super::resolver::WordParts;

/// One `wrong -> right` row of the corrections panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    /// Token index of the first occurrence; fixing the row fixes this token.
    pub token_index: usize,
    pub word: String,
    pub correction: String,
    pub reason: String,
}

/// Collect one row per distinct flagged word, keyed by its lowercase core.
///
/// The first occurrence in document order wins.
pub fn explanations(tokens: &[&str], suggestions: &[Option<Suggestion>]) -> Vec<Explanation> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .zip(suggestions)
        .enumerate()
        .filter_map(|(token_index, (token, suggestion))| {
            let suggestion = suggestion.as_ref()?;
            let parts = WordParts::parse(token)?;
            seen.insert(parts.key()).then(|| Explanation {
                token_index,
                word: parts.core.to_string(),
                correction: suggestion.correction.clone(),
                reason: suggestion.reason.clone(),
            })
        })
        .collect()
}
