//! Snapshots of the external analysis response.
//!
//! The analysis service is not part of this crate. Its JSON output is read
//! from disk (see `--suggestions`) and only the `changes` list drives the
//! highlighter; the remaining fields feed the status bar.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::annotate::{AiSuggestion, TypoDictionary};

/// Failure to read a suggestions or dictionary file.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: expected an analysis response or a list of changes", .path.display())]
    Shape { path: PathBuf },
}

/// Score summary produced by the analysis service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Consistency {
    pub score: f64,
    pub word_count: u64,
    pub sentence_count: u64,
    pub tone: String,
}

/// The parts of an analysis response this crate understands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    pub output: Option<String>,
    pub consistency: Option<Consistency>,
    pub explanation: Vec<String>,
    pub changes: Vec<AiSuggestion>,
}

impl AnalysisReport {
    /// Interpret a parsed JSON document.
    ///
    /// Accepts the full response (`changes` at the top level or under
    /// `diff.changes`) or a bare array of `{before, after}` pairs. Returns
    /// `None` for anything else.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self {
                changes: changes_from(items),
                ..Self::default()
            }),
            Value::Object(map) => {
                let known = ["output", "consistency", "explanation", "diff", "changes"];
                if !known.iter().any(|key| map.contains_key(*key)) {
                    return None;
                }
                let changes = map
                    .get("changes")
                    .or_else(|| value.pointer("/diff/changes"))
                    .and_then(Value::as_array)
                    .map(|items| changes_from(items))
                    .unwrap_or_default();
                Some(Self {
                    output: map.get("output").and_then(Value::as_str).map(ToOwned::to_owned),
                    consistency: map
                        .get("consistency")
                        .and_then(|c| serde_json::from_value(c.clone()).ok()),
                    explanation: map
                        .get("explanation")
                        .and_then(Value::as_array)
                        .map(|items| {
                            items
                                .iter()
                                .filter_map(Value::as_str)
                                .map(ToOwned::to_owned)
                                .collect()
                        })
                        .unwrap_or_default(),
                    changes,
                })
            }
            _ => None,
        }
    }

    /// Read and interpret a suggestions file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not JSON, or has an
    /// unrecognized shape.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|source| AnalysisError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let report = Self::from_value(&value).ok_or_else(|| AnalysisError::Shape {
            path: path.to_path_buf(),
        })?;
        tracing::info!(
            path = %path.display(),
            changes = report.changes.len(),
            "loaded analysis suggestions"
        );
        Ok(report)
    }

    /// Number of change pairs that can actually match a word.
    pub fn usable_changes(&self) -> usize {
        self.changes.iter().filter(|c| c.is_usable()).count()
    }
}

fn changes_from(items: &[Value]) -> Vec<AiSuggestion> {
    items
        .iter()
        .filter(|item| item.is_object())
        .map(AiSuggestion::from_value)
        .collect()
}

/// Read a dictionary override file.
///
/// # Errors
/// Returns an error if the file cannot be read or is not an object of
/// `{ "correction": .., "reason": .. }` records.
pub fn load_dictionary(path: &Path) -> Result<TypoDictionary, AnalysisError> {
    let content = std::fs::read_to_string(path).map_err(|source| AnalysisError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let dictionary = TypoDictionary::from_json(&content).map_err(|source| AnalysisError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), entries = dictionary.len(), "loaded dictionary overrides");
    Ok(dictionary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_full_response_with_top_level_changes() {
        let value = json!({
            "output": "Their governments don't listen",
            "consistency": { "score": 82, "wordCount": 4, "sentenceCount": 1, "tone": "neutral" },
            "explanation": ["Fixed spelling.", 7],
            "changes": [
                { "type": "spelling", "before": "govermentss", "after": "governments" },
                { "before": "dont" }
            ]
        });
        let report = AnalysisReport::from_value(&value).unwrap();
        assert_eq!(report.output.as_deref(), Some("Their governments don't listen"));
        let consistency = report.consistency.as_ref().unwrap();
        assert!((consistency.score - 82.0).abs() < f64::EPSILON);
        assert_eq!(consistency.tone, "neutral");
        assert_eq!(report.explanation, vec!["Fixed spelling.".to_string()]);
        assert_eq!(report.changes.len(), 2);
        assert_eq!(report.usable_changes(), 1);
    }

    #[test]
    fn test_changes_nested_under_diff() {
        let value = json!({
            "output": "x",
            "diff": { "beforeWords": 1, "afterWords": 1, "changes": [{ "before": "a", "after": "b" }] }
        });
        let report = AnalysisReport::from_value(&value).unwrap();
        assert_eq!(report.changes, vec![AiSuggestion::new("a", "b")]);
    }

    #[test]
    fn test_bare_array_skips_non_objects() {
        let value = json!([{ "before": "teh", "after": "the" }, "junk", null]);
        let report = AnalysisReport::from_value(&value).unwrap();
        assert_eq!(report.changes, vec![AiSuggestion::new("teh", "the")]);
        assert!(report.consistency.is_none());
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert!(AnalysisReport::from_value(&json!({ "hello": 1 })).is_none());
        assert!(AnalysisReport::from_value(&json!("text")).is_none());
    }

    #[test]
    fn test_bad_consistency_does_not_fail_report() {
        let value = json!({ "consistency": { "score": "high" }, "changes": [] });
        let report = AnalysisReport::from_value(&value).unwrap();
        assert!(report.consistency.is_none());
    }

    #[test]
    fn test_load_reports_parse_errors_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analysis.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = AnalysisReport::load(&path).unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { .. }));
        assert!(err.to_string().contains("analysis.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = AnalysisReport::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, AnalysisError::Read { .. }));
    }

    #[test]
    fn test_load_dictionary_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.json");
        std::fs::write(
            &path,
            r#"{ "Wrold": { "correction": "world", "reason": "Transposed letters." } }"#,
        )
        .unwrap();
        let dict = load_dictionary(&path).unwrap();
        assert_eq!(dict.lookup("wrold").map(|s| s.correction.as_str()), Some("world"));
    }
}
