use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::analysis::{AnalysisReport, load_dictionary};
use crate::annotate::TypoDictionary;
use crate::app::{App, Message, Model, ToastLevel, update};
use crate::watcher::{SuggestionWatcher, WatchStatus};

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Build the initial model from the configured files.
    ///
    /// Problems with the dictionary or suggestions files are reported as
    /// toasts; only an unreadable draft is an error.
    ///
    /// # Errors
    /// Returns an error if the draft file exists but cannot be read.
    pub fn build_model(&self, terminal_size: (u16, u16)) -> Result<Model> {
        let draft = self
            .file_path
            .as_deref()
            .map(crate::import::read_document)
            .transpose()?
            .unwrap_or_default();

        let mut warnings = Vec::new();
        let dictionary = match &self.dictionary_path {
            Some(path) => match load_dictionary(path) {
                Ok(extra) => std::sync::Arc::new(TypoDictionary::builtin().merged(&extra)),
                Err(err) => {
                    warnings.push(format!("Dictionary: {err}"));
                    TypoDictionary::builtin()
                }
            },
            None => TypoDictionary::builtin(),
        };

        let mut model =
            Model::new(self.file_path.clone(), &draft.text, terminal_size).with_dictionary(dictionary);
        if draft.lossy {
            model.buffer.mark_dirty();
            warnings.push("Invalid UTF-8 was replaced; saving will rewrite those bytes".to_string());
        }
        model.panel_visible = self.panel_visible;
        model.watch_enabled = self.watch_enabled;
        model.suggestions_path.clone_from(&self.suggestions_path);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        if let Some(path) = &self.suggestions_path {
            match AnalysisReport::load(path) {
                Ok(report) => model.set_report(report),
                Err(err) if path.exists() => warnings.push(format!("Suggestions: {err}")),
                // The service may not have written its first response yet.
                Err(err) => tracing::info!("no suggestions yet: {err}"),
            }
        }
        if let Some(warning) = warnings.pop() {
            model.show_toast(ToastLevel::Warning, warning);
        }
        // Lay out again for the chosen panel visibility.
        model.refresh_view();
        Ok(model)
    }

    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, reading the draft,
    /// or the event loop encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - typolens requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let result = self
            .build_model((size.width, size.height))
            .and_then(|mut model| Self::event_loop(&mut terminal, &mut model));

        // Restore terminal
        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn start_watcher(model: &mut Model) -> Option<SuggestionWatcher> {
        if !model.watch_enabled {
            return None;
        }
        match Self::make_suggestion_watcher(model) {
            Some(Ok(watcher)) => Some(watcher),
            Some(Err(err)) => {
                model.watch_enabled = false;
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                tracing::warn!("watch unavailable: {err}");
                None
            }
            None => {
                model.watch_enabled = false;
                model.show_toast(
                    ToastLevel::Warning,
                    "Nothing to watch: pass --suggestions PATH",
                );
                None
            }
        }
    }

    fn dispatch(model: &mut Model, msg: Message) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, &side_msg);
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut watcher = Self::start_watcher(model);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        set_mouse_motion_tracking(true)?;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                Self::dispatch(model, Message::Resize(width, height));
                needs_render = true;
            }

            match watcher.as_mut().map(SuggestionWatcher::poll) {
                Some(WatchStatus::Pending) if !model.generating => {
                    Self::dispatch(model, Message::SuggestionsPending);
                    needs_render = true;
                }
                Some(WatchStatus::Ready) => {
                    *model = update(std::mem::take(model), Message::ReloadSuggestions);
                    Self::reload_suggestions(model, false);
                    needs_render = true;
                }
                _ => {}
            }

            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() || model.generating {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Coalesce key repeat bursts and pastes into a single render.
                let mut handled = 0_u32;
                loop {
                    let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg =
                        Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        crate::perf::log_event(
                            "event.message",
                            format!("frame={frame_idx} msg={msg:?}"),
                        );
                        Self::dispatch(model, msg);
                        handled += 1;
                        needs_render = true;
                    }
                    if model.should_quit || !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
                if handled > 1 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} handled={handled}"),
                    );
                }
            }

            if model.should_quit {
                break;
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| Self::view(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3} issues={}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0,
                        model.annotations().issue_count(),
                    ),
                );
                needs_render = false;
            }
        }
        let _ = set_mouse_motion_tracking(false);
        Ok(())
    }
}

fn set_mouse_motion_tracking(enable: bool) -> std::io::Result<()> {
    // Request any-event mouse motion reporting (1003) with SGR encoding (1006)
    // so hovering a word opens its card without a button held.
    let mut out = stdout();
    if enable {
        out.write_all(b"\x1b[?1003h\x1b[?1006h")?;
    } else {
        out.write_all(b"\x1b[?1003l\x1b[?1006l")?;
    }
    out.flush()
}
