//! Built-in misspelling table.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

/// A proposed correction plus the reason shown to the writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub correction: String,
    pub reason: String,
}

impl Suggestion {
    pub fn new(correction: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            correction: correction.into(),
            reason: reason.into(),
        }
    }
}

const BUILTIN_ENTRIES: &[(&str, &str, &str)] = &[
    ("todays", "today's", "Missing apostrophe: should be \"today's\"."),
    ("peoples", "people", "\"People\" is already plural; \"peoples\" is not standard."),
    ("depend", "dependent", "The adjective form needed here is \"dependent\"."),
    ("technologyy", "technology", "Extra \"y\": spelling error."),
    ("technologye", "technology", "Extra \"e\": spelling error."),
    ("then", "than", "\"Than\" is used for comparisons; \"then\" refers to time."),
    ("create", "creates", "Singular subject \"This\" requires \"creates\"."),
    ("oppurtunities", "opportunities", "Misspelling: correct is \"opportunities\"."),
    ("spends", "spend", "Plural subject \"students\" takes \"spend\"."),
    ("medias", "media", "\"Media\" is already plural."),
    ("effect", "affect", "\"Affect\" is the verb; \"effect\" is usually a noun."),
    ("challengees", "challenges", "Extra \"e\": correct is \"challenges\"."),
    ("challanges", "challenges", "Misspelling: correct is \"challenges\"."),
    ("severel", "several", "Misspelling: correct is \"several\"."),
    ("concentrashun", "concentration", "Phonetic misspelling: correct is \"concentration\"."),
    ("goverments", "governments", "Missing \"n\": correct is \"governments\"."),
    ("dont", "don't", "Contraction needs an apostrophe: \"don't\"."),
    ("noww", "now", "Extra \"w\": spelling error."),
    ("consequencee", "consequence", "Extra \"e\": correct is \"consequence\"."),
    ("concequence", "consequence", "Misspelling: correct is \"consequence\"."),
];

static BUILTIN: LazyLock<Arc<TypoDictionary>> = LazyLock::new(|| {
    Arc::new(TypoDictionary::from_entries(BUILTIN_ENTRIES.iter().map(
        |(word, correction, reason)| (*word, Suggestion::new(*correction, *reason)),
    )))
});

/// Immutable mapping from a lowercase misspelling to its [`Suggestion`].
///
/// The built-in table is created once per process and shared; extended
/// dictionaries are new values, never in-place mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypoDictionary {
    entries: HashMap<String, Suggestion>,
}

impl TypoDictionary {
    /// The shared built-in dictionary.
    pub fn builtin() -> Arc<Self> {
        Arc::clone(&BUILTIN)
    }

    /// Build a dictionary from `(word, suggestion)` pairs. Keys are lowercased.
    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Suggestion)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(word, suggestion)| (word.as_ref().trim().to_lowercase(), suggestion))
                .filter(|(word, _)| !word.is_empty())
                .collect(),
        }
    }

    /// Parse a JSON object of `{ "word": { "correction": .., "reason": .. } }`.
    ///
    /// # Errors
    /// Returns an error if `json` is not an object of suggestion records.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let raw: HashMap<String, Suggestion> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw))
    }

    /// A new dictionary with `other`'s entries layered over this one.
    pub fn merged(&self, other: &Self) -> Self {
        let mut entries = self.entries.clone();
        entries.extend(
            other
                .entries
                .iter()
                .map(|(word, suggestion)| (word.clone(), suggestion.clone())),
        );
        Self { entries }
    }

    /// Look up an already-lowercased word.
    pub fn lookup(&self, key: &str) -> Option<&Suggestion> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_known_misspellings() {
        let dict = TypoDictionary::builtin();
        assert_eq!(dict.len(), BUILTIN_ENTRIES.len());
        assert_eq!(
            dict.lookup("goverments").map(|s| s.correction.as_str()),
            Some("governments")
        );
        assert_eq!(dict.lookup("dont").map(|s| s.correction.as_str()), Some("don't"));
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = TypoDictionary::builtin();
        let b = TypoDictionary::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_from_entries_lowercases_keys() {
        let dict = TypoDictionary::from_entries([("Recieve", Suggestion::new("receive", "i before e"))]);
        assert!(dict.lookup("recieve").is_some());
        assert!(dict.lookup("Recieve").is_none());
    }

    #[test]
    fn test_from_json_parses_records() {
        let dict = TypoDictionary::from_json(
            r#"{ "teh": { "correction": "the", "reason": "Transposed letters." } }"#,
        )
        .unwrap();
        assert_eq!(dict.lookup("teh"), Some(&Suggestion::new("the", "Transposed letters.")));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(TypoDictionary::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_merged_overrides_without_mutating_base() {
        let base = TypoDictionary::builtin();
        let extra = TypoDictionary::from_entries([("dont", Suggestion::new("do not", "Formal."))]);
        let merged = base.merged(&extra);
        assert_eq!(merged.lookup("dont").map(|s| s.correction.as_str()), Some("do not"));
        assert_eq!(base.lookup("dont").map(|s| s.correction.as_str()), Some("don't"));
        assert_eq!(merged.len(), base.len());
    }
}
