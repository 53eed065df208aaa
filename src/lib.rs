// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. annotate::Annotations)
    clippy::module_name_repetitions
)]

//! # Typolens
//!
//! A terminal writing surface that highlights typos and applies fixes in place.
//!
//! Typolens edits a plain-text draft and, on every change:
//! - Splits it into word and whitespace tokens
//! - Flags words found in a built-in typo dictionary or in the latest
//!   analysis response
//! - Underlines flagged words, shows a suggestion card on hover and applies
//!   the fix on click, keeping the original capitalization
//! - Lists each distinct correction once in a side panel
//!
//! ## Architecture
//!
//! Typolens uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`annotate`]: Tokenizer, suggestion resolver and corrections
//! - [`analysis`]: Analysis response and dictionary files
//! - [`overlay`]: Wrapped text geometry, hit-map and hover card placement
//! - [`editor`]: The editable draft
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`import`]: Reading and writing drafts
//! - [`watcher`]: Suggestions file watching
//! - [`config`]: Saved default flags

pub mod analysis;
pub mod annotate;
pub mod app;
pub mod config;
pub mod editor;
pub mod import;
pub mod overlay;
pub mod perf;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::annotate::{Annotations, Suggestion, TypoDictionary};
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::EditorBuffer;
}
