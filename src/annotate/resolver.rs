//! Per-token suggestion lookup.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::dictionary::{Suggestion, TypoDictionary};

/// Reason attached to suggestions that came from the analysis response.
pub const AI_REASON: &str = "AI-detected correction";

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^A-Za-z']*)([A-Za-z']+)([^A-Za-z']*)$").expect("word pattern is valid")
});

/// A token split into non-letter prefix, letter/apostrophe core and suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordParts<'a> {
    pub leading: &'a str,
    pub core: &'a str,
    pub trailing: &'a str,
}

impl<'a> WordParts<'a> {
    /// Match `token` against the three-group word pattern.
    ///
    /// Returns `None` for whitespace, pure punctuation, numbers, and tokens
    /// whose letters are interrupted by other characters (`"e-mail"`).
    pub fn parse(token: &'a str) -> Option<Self> {
        let caps = WORD_PATTERN.captures(token)?;
        Some(Self {
            leading: caps.get(1).map_or("", |m| m.as_str()),
            core: caps.get(2)?.as_str(),
            trailing: caps.get(3).map_or("", |m| m.as_str()),
        })
    }

    /// Lowercase lookup key for the core.
    pub fn key(&self) -> String {
        self.core.to_lowercase()
    }
}

/// One `(before, after)` pair from the last analysis response.
///
/// Both sides are optional because the response is not fully trusted;
/// pairs with a missing or blank side never match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiSuggestion {
    #[serde(default)]
    pub before: Option<String>,
    #[serde(default)]
    pub after: Option<String>,
}

impl AiSuggestion {
    pub fn new(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            before: Some(before.into()),
            after: Some(after.into()),
        }
    }

    /// Lenient conversion from an arbitrary JSON value.
    ///
    /// Non-string fields become `None` instead of failing the whole list.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned)
        };
        Self {
            before: field("before"),
            after: field("after"),
        }
    }

    /// Whether both sides are present and non-blank.
    pub fn is_usable(&self) -> bool {
        let filled = |side: &Option<String>| side.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.before) && filled(&self.after)
    }

    fn correction_for(&self, key: &str) -> Option<Suggestion> {
        if !self.is_usable() {
            return None;
        }
        let before = self.before.as_deref()?.trim();
        let after = self.after.as_deref()?.trim();
        (before.to_lowercase() == key).then(|| Suggestion::new(after, AI_REASON))
    }
}

/// Resolve the suggestion for a single token.
///
/// The static dictionary is consulted first; dynamic pairs are only used
/// when it has no entry. Matching is exact on the lowercased word core.
pub fn resolve(
    token: &str,
    dictionary: &TypoDictionary,
    dynamic: &[AiSuggestion],
) -> Option<Suggestion> {
    let key = WordParts::parse(token)?.key();
    if let Some(hit) = dictionary.lookup(&key) {
        return Some(hit.clone());
    }
    dynamic.iter().find_map(|pair| pair.correction_for(&key))
}

/// Resolve every token of a render pass.
pub fn resolve_all(
    tokens: &[&str],
    dictionary: &TypoDictionary,
    dynamic: &[AiSuggestion],
) -> Vec<Option<Suggestion>> {
    tokens
        .iter()
        .map(|token| resolve(token, dictionary, dynamic))
        .collect()
}
