use crate::analysis::AnalysisReport;
use crate::app::{App, Message, Model, ToastLevel};
use crate::import::{read_document, write_document};
use crate::watcher::{DEFAULT_DEBOUNCE, SuggestionWatcher};

impl App {
    pub(super) fn make_suggestion_watcher(model: &Model) -> Option<notify::Result<SuggestionWatcher>> {
        let path = model.suggestions_path.as_ref()?;
        Some(SuggestionWatcher::new(path, DEFAULT_DEBOUNCE))
    }

    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::Save => Self::save(model),
            Message::Import => Self::import(model),
            Message::ReloadSuggestions => Self::reload_suggestions(model, true),
            _ => {}
        }
    }

    fn save(model: &mut Model) {
        let Some(path) = model.file_path.clone() else {
            model.show_toast(
                ToastLevel::Warning,
                "No file to save to (start typolens with a FILE)",
            );
            return;
        };
        let _scope = crate::perf::scope("effects.save");
        match write_document(&path, &model.buffer.text()) {
            Ok(()) => {
                model.buffer.mark_clean();
                model.show_toast(ToastLevel::Info, format!("Saved {}", model.file_name()));
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "save failed: {err:#}");
                model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
            }
        }
    }

    fn import(model: &mut Model) {
        let Some(path) = model.file_path.clone() else {
            model.show_toast(ToastLevel::Warning, "No file to import");
            return;
        };
        if model.is_dirty() && !model.import_confirmed {
            model.show_toast(
                ToastLevel::Warning,
                "Unsaved changes! Press Ctrl+O again to discard them and re-import",
            );
            model.import_confirmed = true;
            return;
        }
        model.import_confirmed = false;
        match read_document(&path) {
            Ok(draft) => {
                model.load_draft(&draft);
                if !draft.lossy {
                    model.show_toast(ToastLevel::Info, format!("Imported {}", model.file_name()));
                }
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "import failed: {err:#}");
                model.show_toast(ToastLevel::Error, format!("Import failed: {err:#}"));
            }
        }
    }

    /// Read the suggestions file into the model. `announce` adds a toast on
    /// success; watcher-driven reloads stay quiet.
    pub(super) fn reload_suggestions(model: &mut Model, announce: bool) {
        let Some(path) = model.suggestions_path.clone() else {
            model.generating = false;
            model.show_toast(
                ToastLevel::Warning,
                "No suggestions file (use --suggestions PATH)",
            );
            return;
        };
        let _scope = crate::perf::scope("effects.reload_suggestions");
        match AnalysisReport::load(&path) {
            Ok(report) => {
                let usable = report.usable_changes();
                model.set_report(report);
                if announce {
                    let plural = if usable == 1 { "" } else { "s" };
                    model.show_toast(ToastLevel::Info, format!("Loaded {usable} suggestion{plural}"));
                }
            }
            Err(err) => {
                tracing::warn!("suggestion reload failed: {err}");
                model.generating = false;
                model.show_toast(ToastLevel::Error, format!("Suggestions: {err}"));
            }
        }
    }
}
