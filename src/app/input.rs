use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use crate::app::model::Focus;
use crate::app::{App, Message, Model};
use crate::editor::Direction;

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Some(Message::InsertText(text.clone())),
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize.queue", format!("width={w} height={h}"));
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match mouse.kind {
                MouseEventKind::Down(_) => Some(Message::HideHelp),
                MouseEventKind::ScrollDown => Some(Message::HelpScrollDown),
                MouseEventKind::ScrollUp => Some(Message::HelpScrollUp),
                _ => None,
            };
        }

        let screen = model.screen();
        let text = screen.text();
        let in_text = crate::ui::contains(text, mouse.column, mouse.row);
        let in_panel = screen
            .panel
            .is_some_and(|panel| crate::ui::contains(panel, mouse.column, mouse.row));
        let rel_row = mouse.row.saturating_sub(text.y);
        let rel_col = mouse.column.saturating_sub(text.x);
        let on_card = model
            .hover
            .as_ref()
            .filter(|hover| in_text && hover.contains(rel_row, rel_col));
        let token = if in_text {
            model
                .view()
                .hitmap
                .token_at(model.scroll_offset + usize::from(rel_row), rel_col)
        } else {
            None
        };

        match mouse.kind {
            MouseEventKind::Moved => {
                if on_card.is_some() {
                    return None;
                }
                match token {
                    Some(index) if model.hover.as_ref().is_some_and(|h| h.token_index == index) => {
                        None
                    }
                    Some(index) if !model.generating => Some(Message::HoverToken(index)),
                    _ => model.hover.as_ref().map(|_| Message::ClearHover),
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(hover) = on_card {
                    return Some(Message::ApplyFix(hover.token_index));
                }
                if let Some(index) = token {
                    return Some(Message::ApplyFix(index));
                }
                if in_text {
                    return Some(Message::MoveTo {
                        row: model.scroll_offset + usize::from(rel_row),
                        col: rel_col,
                    });
                }
                let panel = screen.panel.filter(|_| in_panel)?;
                let entry = crate::ui::panel_entry_at(panel, mouse.row, model.panel_scroll)?;
                (entry < model.explanation_count()).then_some(Message::PanelFix(entry))
            }
            MouseEventKind::ScrollDown if in_panel => Some(Message::PanelScrollDown),
            MouseEventKind::ScrollUp if in_panel => Some(Message::PanelScrollUp),
            MouseEventKind::ScrollDown => {
                (model.scroll_offset < model.max_scroll()).then_some(Message::ScrollDown(3))
            }
            MouseEventKind::ScrollUp => (model.scroll_offset > 0).then_some(Message::ScrollUp(3)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if model.help_visible {
            return match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Message::HelpScrollDown),
                KeyCode::Char('k') | KeyCode::Up => Some(Message::HelpScrollUp),
                _ => Some(Message::HideHelp),
            };
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::Char('s') if ctrl => return Some(Message::Save),
            KeyCode::Char('o') if ctrl => return Some(Message::Import),
            KeyCode::Char('r') if ctrl => return Some(Message::ReloadSuggestions),
            KeyCode::Char('p') if ctrl => return Some(Message::TogglePanel),
            KeyCode::Char('l') if ctrl => return Some(Message::FlattenPages),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Esc => return Some(Message::Escape),
            KeyCode::Tab if model.screen().panel.is_some() => return Some(Message::ToggleFocus),
            _ => {}
        }

        if model.focus == Focus::Panel {
            return match key.code {
                KeyCode::Up => Some(Message::PanelUp),
                KeyCode::Down => Some(Message::PanelDown),
                KeyCode::Enter | KeyCode::Char(' ') => Some(Message::PanelFixSelected),
                KeyCode::Char(c @ '1'..='9') => {
                    Some(Message::PanelFix(usize::from(c as u8 - b'1')))
                }
                KeyCode::PageUp => Some(Message::PageUp),
                KeyCode::PageDown => Some(Message::PageDown),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                Some(Message::InsertChar(c))
            }
            KeyCode::Tab => Some(Message::InsertChar('\t')),
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down)),
            KeyCode::Home if ctrl => Some(Message::MoveToStart),
            KeyCode::End if ctrl => Some(Message::MoveToEnd),
            KeyCode::Home => Some(Message::MoveHome),
            KeyCode::End => Some(Message::MoveEnd),
            KeyCode::PageUp => Some(Message::PageUp),
            KeyCode::PageDown => Some(Message::PageDown),
            _ => None,
        }
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
