use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::analysis::AnalysisReport;
use crate::annotate::{AiSuggestion, Annotations, TypoDictionary};
use crate::editor::EditorBuffer;
use crate::import::ImportedDraft;
use crate::overlay::{HitMap, HoverState, Layout};
use crate::ui::ScreenLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Which pane receives keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Editor,
    Panel,
}

/// Everything derived from the draft for one render pass.
#[derive(Debug, Clone, Default)]
pub struct DraftView {
    pub annotations: Annotations,
    pub layout: Layout,
    pub hitmap: HitMap,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The draft being edited
    pub buffer: EditorBuffer,
    /// File the draft was imported from and is saved to
    pub file_path: Option<PathBuf>,
    /// Built-in dictionary merged with any overrides
    pub dictionary: Arc<TypoDictionary>,
    /// Dynamic suggestions from the latest analysis response
    pub ai_suggestions: Vec<AiSuggestion>,
    /// The latest analysis response, for the status bar
    pub report: Option<AnalysisReport>,
    /// Where analysis responses are read from
    pub suggestions_path: Option<PathBuf>,
    /// True while new suggestions are on their way; fixes are suppressed
    pub generating: bool,
    /// The open hover card
    pub hover: Option<HoverState>,
    /// First visible layout row
    pub scroll_offset: usize,
    pub terminal_size: (u16, u16),
    /// Whether the corrections panel is visible
    pub panel_visible: bool,
    pub focus: Focus,
    /// Selected panel entry
    pub panel_selected: usize,
    /// First visible panel entry
    pub panel_scroll: usize,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// First visible help line
    pub help_scroll_offset: usize,
    /// Whether the suggestions file is watched
    pub watch_enabled: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; allows second quit to proceed
    pub quit_confirmed: bool,
    /// Set after first import attempt with unsaved changes; allows second import to discard
    pub import_confirmed: bool,
    view: DraftView,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("chars", &self.buffer.len_chars())
            .field("issues", &self.view.annotations.issue_count())
            .field("generating", &self.generating)
            .field("panel_visible", &self.panel_visible)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model for `text` with the built-in dictionary.
    pub fn new(file_path: Option<PathBuf>, text: &str, terminal_size: (u16, u16)) -> Self {
        let mut model = Self {
            buffer: EditorBuffer::from_text(text),
            file_path,
            dictionary: TypoDictionary::builtin(),
            ai_suggestions: Vec::new(),
            report: None,
            suggestions_path: None,
            generating: false,
            hover: None,
            scroll_offset: 0,
            terminal_size,
            panel_visible: true,
            focus: Focus::Editor,
            panel_selected: 0,
            panel_scroll: 0,
            help_visible: false,
            help_scroll_offset: 0,
            watch_enabled: false,
            config_global_path: None,
            config_local_path: None,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
            import_confirmed: false,
            view: DraftView::default(),
        };
        model.refresh_view();
        model
    }

    /// Replace the dictionary and re-resolve.
    pub fn with_dictionary(mut self, dictionary: Arc<TypoDictionary>) -> Self {
        self.dictionary = dictionary;
        self.refresh_view();
        self
    }

    /// Install a freshly loaded analysis response.
    pub fn set_report(&mut self, report: AnalysisReport) {
        self.ai_suggestions.clone_from(&report.changes);
        self.report = Some(report);
        self.generating = false;
        self.hover = None;
        self.refresh_view();
    }

    /// Load a draft read from disk. A lossy decode leaves the buffer dirty
    /// with a warning, since saving would rewrite the replaced bytes.
    pub fn load_draft(&mut self, draft: &ImportedDraft) {
        self.load_text(&draft.text);
        if draft.lossy {
            self.buffer.mark_dirty();
            self.show_toast(
                ToastLevel::Warning,
                "Invalid UTF-8 was replaced; saving will rewrite those bytes",
            );
        }
    }

    /// Replace the draft wholesale, as on import.
    pub fn load_text(&mut self, text: &str) {
        self.buffer = EditorBuffer::from_text(text);
        self.hover = None;
        self.scroll_offset = 0;
        self.panel_selected = 0;
        self.panel_scroll = 0;
        self.refresh_view();
    }

    pub fn view(&self) -> &DraftView {
        &self.view
    }

    pub fn annotations(&self) -> &Annotations {
        &self.view.annotations
    }

    pub fn screen(&self) -> ScreenLayout {
        let (width, height) = self.terminal_size;
        crate::ui::screen_layout(
            Rect::new(0, 0, width, height),
            self.panel_visible,
            self.toast.is_some(),
        )
    }

    /// Size of the draft text area as `(width, height)`.
    pub fn text_size(&self) -> (u16, u16) {
        let text = self.screen().text();
        (text.width, text.height)
    }

    /// Tokenize, resolve and lay out the draft again.
    pub(super) fn refresh_view(&mut self) {
        let _scope = crate::perf::scope("model.refresh_view");
        let text = self.buffer.text();
        let annotations = Annotations::compute(&text, &self.dictionary, &self.ai_suggestions);
        let layout = Layout::new(&annotations.tokens(), self.text_size().0);
        let hitmap = HitMap::build(&layout, &annotations);
        self.view = DraftView {
            annotations,
            layout,
            hitmap,
        };
        self.clamp_scroll();
        let entries = self.explanation_count();
        self.panel_selected = self.panel_selected.min(entries.saturating_sub(1));
    }

    pub fn explanation_count(&self) -> usize {
        self.view.annotations.explanations().len()
    }

    pub(super) fn max_scroll(&self) -> usize {
        let height = usize::from(self.text_size().1);
        self.view.layout.row_count().saturating_sub(height)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    /// Scroll so the cursor row is on screen.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let (row, _) = self.view.layout.position_of(self.buffer.cursor());
        let height = usize::from(self.text_size().1);
        let before = self.scroll_offset;
        if height == 0 {
            self.scroll_offset = row;
        } else if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + height {
            self.scroll_offset = row + 1 - height;
        }
        if self.scroll_offset != before {
            self.hover = None;
        }
    }

    /// Keep the selected panel entry inside the visible window.
    pub(super) fn ensure_panel_selection_visible(&mut self) {
        let Some(panel) = self.screen().panel else {
            return;
        };
        let capacity = crate::ui::panel_capacity(panel);
        if self.panel_selected < self.panel_scroll {
            self.panel_scroll = self.panel_selected;
        } else if self.panel_selected >= self.panel_scroll + capacity {
            self.panel_scroll = self.panel_selected + 1 - capacity;
        }
    }

    pub fn file_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string())
    }

    pub const fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
        // The toast row shrinks the editor.
        self.clamp_scroll();
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            self.clamp_scroll();
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(None, "", (80, 24))
    }
}
