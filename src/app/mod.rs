//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{DraftView, Focus, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
    suggestions_path: Option<PathBuf>,
    dictionary_path: Option<PathBuf>,
    watch_enabled: bool,
    panel_visible: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application for the given draft file; `None` starts
    /// with an empty, unsaved draft.
    pub fn new(file_path: Option<PathBuf>) -> Self {
        Self {
            file_path,
            suggestions_path: None,
            dictionary_path: None,
            watch_enabled: false,
            panel_visible: true,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Read dynamic suggestions from this analysis response file.
    pub fn with_suggestions(mut self, path: Option<PathBuf>) -> Self {
        self.suggestions_path = path;
        self
    }

    /// Merge dictionary overrides from this file over the built-in entries.
    pub fn with_dictionary(mut self, path: Option<PathBuf>) -> Self {
        self.dictionary_path = path;
        self
    }

    /// Reload suggestions whenever the suggestions file changes.
    pub fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Set initial corrections panel visibility.
    pub fn with_panel_visible(mut self, visible: bool) -> Self {
        self.panel_visible = visible;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
