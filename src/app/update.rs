use crate::annotate::apply_correction;
use crate::app::Model;
use crate::app::model::{Focus, ToastLevel};
use crate::editor::Direction;
use crate::import::flatten_pages;
use crate::overlay::{HoverState, TOOLTIP_HEIGHT, TOOLTIP_WIDTH, place_tooltip};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert pasted text at the cursor
    InsertText(String),
    /// Delete character before cursor (Backspace)
    DeleteBack,
    /// Delete character at cursor (Delete)
    DeleteForward,
    /// Break the line at the cursor (Enter)
    SplitLine,
    /// Replace page breaks with blank lines
    FlattenPages,

    // Cursor
    /// Move cursor; up and down follow the wrapped rows
    MoveCursor(Direction),
    /// Move cursor to beginning of line (Home)
    MoveHome,
    /// Move cursor to end of line (End)
    MoveEnd,
    /// Move cursor one word left (Ctrl+Left)
    MoveWordLeft,
    /// Move cursor one word right (Ctrl+Right)
    MoveWordRight,
    /// Move cursor to start of draft (Ctrl+Home)
    MoveToStart,
    /// Move cursor to end of draft (Ctrl+End)
    MoveToEnd,
    /// Move cursor to a layout position, e.g. from a mouse click
    MoveTo { row: usize, col: u16 },

    // Scrolling
    /// Scroll up by n rows
    ScrollUp(usize),
    /// Scroll down by n rows
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,

    // Hover and fixes
    /// Pointer is over a flagged token
    HoverToken(usize),
    /// Close the hover card
    ClearHover,
    /// Apply the suggestion of a token
    ApplyFix(usize),

    // Corrections panel
    /// Show or hide the panel
    TogglePanel,
    /// Switch focus between editor and panel
    ToggleFocus,
    /// Move panel selection up
    PanelUp,
    /// Move panel selection down
    PanelDown,
    /// Scroll panel entries up
    PanelScrollUp,
    /// Scroll panel entries down
    PanelScrollDown,
    /// Fix the panel entry at an index
    PanelFix(usize),
    /// Fix the selected panel entry
    PanelFixSelected,

    // Suggestions
    /// The suggestions file changed and is settling
    SuggestionsPending,
    /// Read the suggestions file again
    ReloadSuggestions,

    // File
    /// Write the draft to its file
    Save,
    /// Read the draft from its file again
    Import,

    // Overlays
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Scroll help text up one line
    HelpScrollUp,
    /// Scroll help text down one line
    HelpScrollDown,
    /// Close the topmost transient thing
    Escape,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// File I/O for `Save`, `Import` and `ReloadSuggestions` happens in the
/// side-effect pass that runs after this.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset confirmation flags on any action other than the confirmed one.
    // Save preserves the quit flag so Ctrl+S can complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }
    if !matches!(msg, Message::Import) {
        model.import_confirmed = false;
    }

    match msg {
        // Editing
        Message::InsertChar(ch) => edit(&mut model, |buf| buf.insert_char(ch)),
        Message::InsertText(text) => edit(&mut model, |buf| buf.insert_str(&text)),
        Message::DeleteBack => edit(&mut model, |buf| {
            buf.delete_back();
        }),
        Message::DeleteForward => edit(&mut model, |buf| {
            buf.delete_forward();
        }),
        Message::SplitLine => edit(&mut model, |buf| buf.insert_char('\n')),
        Message::FlattenPages => {
            let flat = flatten_pages(model.annotations().text());
            match flat {
                Some(flat) => {
                    let cursor = model.buffer.cursor().min(flat.chars().count());
                    edit(&mut model, |buf| buf.replace_text(&flat, cursor));
                }
                None => model.show_toast(ToastLevel::Info, "No page breaks to join"),
            }
        }

        // Cursor
        Message::MoveCursor(dir @ (Direction::Up | Direction::Down)) => {
            move_vertically(&mut model, dir);
        }
        Message::MoveCursor(dir) => move_cursor(&mut model, |buf| buf.move_cursor(dir)),
        Message::MoveHome => move_cursor(&mut model, |buf| buf.move_home()),
        Message::MoveEnd => move_cursor(&mut model, |buf| buf.move_end()),
        Message::MoveWordLeft => move_cursor(&mut model, |buf| buf.move_word_left()),
        Message::MoveWordRight => move_cursor(&mut model, |buf| buf.move_word_right()),
        Message::MoveToStart => move_cursor(&mut model, |buf| buf.move_to_start()),
        Message::MoveToEnd => move_cursor(&mut model, |buf| buf.move_to_end()),
        Message::MoveTo { row, col } => {
            let offset = model.view().layout.offset_at(row, col);
            model.focus = Focus::Editor;
            move_cursor(&mut model, |buf| buf.set_cursor(offset));
        }

        // Scrolling
        Message::ScrollUp(n) => {
            let target = model.scroll_offset.saturating_sub(n);
            scroll_to(&mut model, target);
        }
        Message::ScrollDown(n) => {
            let target = model.scroll_offset + n;
            scroll_to(&mut model, target);
        }
        Message::PageUp => {
            let target = model.scroll_offset.saturating_sub(page_rows(&model));
            scroll_to(&mut model, target);
        }
        Message::PageDown => {
            let target = model.scroll_offset + page_rows(&model);
            scroll_to(&mut model, target);
        }

        // Hover and fixes
        Message::HoverToken(index) => open_hover(&mut model, index),
        Message::ClearHover => model.hover = None,
        Message::ApplyFix(index) => apply_fix(&mut model, index),

        // Corrections panel
        Message::TogglePanel => {
            model.panel_visible = !model.panel_visible;
            if !model.panel_visible {
                model.focus = Focus::Editor;
            }
            model.hover = None;
            model.refresh_view();
            model.ensure_cursor_visible();
        }
        Message::ToggleFocus => {
            model.focus = match model.focus {
                Focus::Editor if model.screen().panel.is_some() => Focus::Panel,
                _ => Focus::Editor,
            };
            model.hover = None;
        }
        Message::PanelUp => {
            model.panel_selected = model.panel_selected.saturating_sub(1);
            model.ensure_panel_selection_visible();
        }
        Message::PanelDown => {
            let last = model.explanation_count().saturating_sub(1);
            model.panel_selected = (model.panel_selected + 1).min(last);
            model.ensure_panel_selection_visible();
        }
        Message::PanelScrollUp => {
            model.panel_scroll = model.panel_scroll.saturating_sub(1);
        }
        Message::PanelScrollDown => {
            let last = model.explanation_count().saturating_sub(1);
            model.panel_scroll = (model.panel_scroll + 1).min(last);
        }
        Message::PanelFix(entry) => panel_fix(&mut model, entry),
        Message::PanelFixSelected => {
            let entry = model.panel_selected;
            panel_fix(&mut model, entry);
        }

        // Suggestions
        Message::SuggestionsPending | Message::ReloadSuggestions => {
            model.generating = true;
            model.hover = None;
        }

        // Handled in side effects
        Message::Save | Message::Import | Message::Redraw => {}

        // Overlays
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
            model.help_scroll_offset = 0;
        }
        Message::HideHelp => model.help_visible = false,
        Message::HelpScrollUp => {
            model.help_scroll_offset = model.help_scroll_offset.saturating_sub(1);
        }
        Message::HelpScrollDown => {
            let max = crate::ui::help_max_scroll(&model);
            model.help_scroll_offset = (model.help_scroll_offset + 1).min(max);
        }
        Message::Escape => {
            if model.help_visible {
                model.help_visible = false;
            } else if model.hover.is_some() {
                model.hover = None;
            } else {
                model.focus = Focus::Editor;
            }
        }

        // Window
        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
            model.hover = None;
            model.refresh_view();
            model.ensure_cursor_visible();
            model.ensure_panel_selection_visible();
        }

        // Application
        Message::Quit => {
            if model.is_dirty() && !model.quit_confirmed {
                model.show_toast(
                    ToastLevel::Warning,
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save",
                );
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

/// Run a buffer edit through the normal path: hover closes, the draft is
/// annotated again and the cursor stays on screen.
fn edit(model: &mut Model, f: impl FnOnce(&mut crate::editor::EditorBuffer)) {
    f(&mut model.buffer);
    model.hover = None;
    model.focus = Focus::Editor;
    model.refresh_view();
    model.ensure_cursor_visible();
}

fn move_cursor(model: &mut Model, f: impl FnOnce(&mut crate::editor::EditorBuffer)) {
    f(&mut model.buffer);
    model.ensure_cursor_visible();
}

fn move_vertically(model: &mut Model, dir: Direction) {
    let layout = &model.view().layout;
    let (row, col) = layout.position_of(model.buffer.cursor());
    let offset = match dir {
        Direction::Up if row == 0 => 0,
        Direction::Up => layout.offset_at(row - 1, col),
        _ if row + 1 >= layout.row_count() => layout.len_chars(),
        _ => layout.offset_at(row + 1, col),
    };
    move_cursor(model, |buf| buf.set_cursor(offset));
}

fn page_rows(model: &Model) -> usize {
    usize::from(model.text_size().1.saturating_sub(1)).max(1)
}

fn scroll_to(model: &mut Model, offset: usize) {
    let offset = offset.min(model.max_scroll());
    if offset != model.scroll_offset {
        model.scroll_offset = offset;
        // The card would float over moved text.
        model.hover = None;
    }
}

fn open_hover(model: &mut Model, index: usize) {
    if model.generating || model.hover.as_ref().is_some_and(|h| h.token_index == index) {
        return;
    }
    let view = model.view();
    let hover = match (
        view.annotations.token(index),
        view.annotations.suggestion(index),
        view.layout.token_rect(index),
    ) {
        (Some(word), Some(suggestion), Some(rect)) => Some(HoverState {
            token_index: index,
            word: word.to_string(),
            suggestion: suggestion.clone(),
            position: place_tooltip(
                rect,
                model.scroll_offset,
                model.text_size(),
                (TOOLTIP_WIDTH, TOOLTIP_HEIGHT),
            ),
        }),
        _ => None,
    };
    model.hover = hover;
}

fn apply_fix(model: &mut Model, index: usize) {
    if model.generating {
        return;
    }
    let Some(correction) = model
        .annotations()
        .suggestion(index)
        .map(|s| s.correction.clone())
    else {
        return;
    };
    let Some(applied) = apply_correction(model.annotations().text(), index, &correction) else {
        return;
    };
    let cursor = applied.shift_offset(model.buffer.cursor());
    model.buffer.replace_text(&applied.text, cursor);
    model.hover = None;
    model.focus = Focus::Editor;
    model.refresh_view();
    model.ensure_cursor_visible();
    tracing::info!(token_index = index, correction = %correction, "applied correction");
}

fn panel_fix(model: &mut Model, entry: usize) {
    let Some(token_index) = model
        .annotations()
        .explanations()
        .get(entry)
        .map(|e| e.token_index)
    else {
        return;
    };
    model.panel_selected = entry;
    apply_fix(model, token_index);
}
