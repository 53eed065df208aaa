//! Loading drafts from disk.

use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};

/// Page separator inside plain-text exports.
pub const PAGE_BREAK: char = '\x0c';

/// A draft read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedDraft {
    pub text: String,
    /// Invalid UTF-8 was replaced, so saving will not reproduce the file.
    pub lossy: bool,
}

/// Join page texts with one blank line between pages.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Split form-feed separated pages and join them with blank lines instead.
///
/// Newlines around each page break are dropped. Returns `None` for a
/// single-page draft.
pub fn flatten_pages(text: &str) -> Option<String> {
    if !text.contains(PAGE_BREAK) {
        return None;
    }
    let pages: Vec<&str> = text
        .split(PAGE_BREAK)
        .map(|page| page.trim_matches(['\r', '\n']))
        .collect();
    Some(join_pages(&pages))
}

/// Decode raw file bytes. Only invalid UTF-8 is touched; line endings and
/// page breaks are kept so a save writes the same bytes back.
pub fn decode_document(bytes: &[u8]) -> ImportedDraft {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(text) => ImportedDraft {
            text: text.to_string(),
            lossy: false,
        },
        Cow::Owned(text) => ImportedDraft { text, lossy: true },
    }
}

/// Read a draft; a missing file yields an empty draft so it can be created
/// on first save.
///
/// # Errors
/// Returns an error if the file exists but cannot be read.
pub fn read_document(path: &Path) -> Result<ImportedDraft> {
    match fs::read(path) {
        Ok(bytes) => {
            let draft = decode_document(&bytes);
            tracing::info!(
                path = %path.display(),
                chars = draft.text.chars().count(),
                lossy = draft.lossy,
                "imported draft"
            );
            Ok(draft)
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "draft does not exist yet");
            Ok(ImportedDraft::default())
        }
        Err(err) => Err(err).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Write the draft verbatim.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "saved draft");
    Ok(())
}
