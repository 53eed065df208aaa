//! Token annotation engine.
//!
//! Every render pass recomputes the whole picture from the current draft:
//! - [`tokenize`] splits the draft into word and whitespace tokens
//! - [`resolve_all`] attaches a [`Suggestion`] to each flagged token
//! - [`explanations`] condenses the flagged tokens into panel rows
//! - [`apply_correction`] splices a fix back into the draft
//!
//! [`Annotations`] bundles one pass so the renderer, the hit-map and the
//! panel all read the same tokens.

mod correction;
mod dictionary;
mod explain;
mod resolver;
mod tokenizer;

use std::ops::Range;

pub use correction::{AppliedCorrection, apply_correction, preserve_case};
pub use dictionary::{Suggestion, TypoDictionary};
pub use explain::{Explanation, explanations};
pub use resolver::{AI_REASON, AiSuggestion, WordParts, resolve, resolve_all};
pub use tokenizer::{is_whitespace_token, join, tokenize};

/// The tokens and suggestions of one render pass.
#[derive(Debug, Clone, Default)]
pub struct Annotations {
    text: String,
    spans: Vec<Range<usize>>,
    suggestions: Vec<Option<Suggestion>>,
}

impl Annotations {
    /// Tokenize and resolve `text` from scratch.
    pub fn compute(text: &str, dictionary: &TypoDictionary, dynamic: &[AiSuggestion]) -> Self {
        let tokens = tokenize(text);
        let suggestions = resolve_all(&tokens, dictionary, dynamic);
        let mut spans = Vec::with_capacity(tokens.len());
        let mut start = 0;
        for token in &tokens {
            spans.push(start..start + token.len());
            start += token.len();
        }
        Self {
            text: text.to_string(),
            spans,
            suggestions,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of tokens; never zero, since empty text is one empty token.
    pub fn token_count(&self) -> usize {
        self.spans.len()
    }

    /// Token text at `index`.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.spans.get(index).map(|span| &self.text[span.clone()])
    }

    pub fn tokens(&self) -> Vec<&str> {
        self.spans.iter().map(|span| &self.text[span.clone()]).collect()
    }

    pub fn suggestion(&self, index: usize) -> Option<&Suggestion> {
        self.suggestions.get(index).and_then(Option::as_ref)
    }

    pub fn is_flagged(&self, index: usize) -> bool {
        self.suggestion(index).is_some()
    }

    /// Number of flagged tokens, counting repeats.
    pub fn issue_count(&self) -> usize {
        self.suggestions.iter().filter(|s| s.is_some()).count()
    }

    /// Flagged tokens in document order.
    pub fn flagged(&self) -> impl Iterator<Item = (usize, &str, &Suggestion)> {
        self.suggestions
            .iter()
            .enumerate()
            .filter_map(|(idx, suggestion)| {
                let suggestion = suggestion.as_ref()?;
                Some((idx, &self.text[self.spans[idx].clone()], suggestion))
            })
    }

    pub fn explanations(&self) -> Vec<Explanation> {
        explanations(&self.tokens(), &self.suggestions)
    }
}
