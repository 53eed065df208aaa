//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`style`]: Colors for flagged tokens, the panel and the hover card
//! - screen geometry shared by rendering and mouse handling

pub mod style;

mod overlays;
mod render;
mod status;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub use overlays::help_max_scroll;
pub use render::render;

/// Share of the width given to the corrections panel.
pub const PANEL_WIDTH_PERCENT: u16 = 36;
/// Below this terminal width the panel is not shown.
pub const MIN_PANEL_TERMINAL_WIDTH: u16 = 60;
/// Rows per entry in the corrections panel.
pub const PANEL_ENTRY_HEIGHT: u16 = 3;
/// Header rows above the first panel entry, inside the border.
pub const PANEL_HEADER_HEIGHT: u16 = 2;

/// Where each part of the screen goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// The bordered draft area.
    pub editor: Rect,
    pub panel: Option<Rect>,
    pub toast: Option<Rect>,
    pub status: Rect,
}

impl ScreenLayout {
    /// Cells the draft text is drawn into.
    pub fn text(&self) -> Rect {
        text_area(self.editor)
    }
}

pub fn screen_layout(area: Rect, panel_visible: bool, toast_active: bool) -> ScreenLayout {
    let footer = 1 + u16::from(toast_active);
    let body_height = area.height.saturating_sub(footer);
    let body = Rect::new(area.x, area.y, area.width, body_height);
    let status = Rect::new(area.x, area.y + body_height, area.width, area.height.min(1));
    let toast = toast_active.then(|| Rect::new(area.x, status.y.saturating_add(1), area.width, 1));

    if panel_visible && area.width >= MIN_PANEL_TERMINAL_WIDTH {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(100 - PANEL_WIDTH_PERCENT),
                Constraint::Percentage(PANEL_WIDTH_PERCENT),
            ])
            .split(body);
        ScreenLayout {
            editor: columns[0],
            panel: Some(columns[1]),
            toast,
            status,
        }
    } else {
        ScreenLayout {
            editor: body,
            panel: None,
            toast,
            status,
        }
    }
}

/// Inside of the editor border.
pub fn text_area(editor: Rect) -> Rect {
    Rect::new(
        editor.x.saturating_add(1),
        editor.y.saturating_add(1),
        editor.width.saturating_sub(2),
        editor.height.saturating_sub(2),
    )
}

/// Number of panel entries that fit in `panel`.
pub fn panel_capacity(panel: Rect) -> usize {
    let inner = panel.height.saturating_sub(2 + PANEL_HEADER_HEIGHT);
    usize::from((inner / PANEL_ENTRY_HEIGHT).max(1))
}

/// Panel entry index under screen row `row`, before bounds checking.
pub fn panel_entry_at(panel: Rect, row: u16, scroll: usize) -> Option<usize> {
    let first = panel.y + 1 + PANEL_HEADER_HEIGHT;
    let last = panel.y + panel.height.saturating_sub(1);
    if row < first || row >= last {
        return None;
    }
    Some(scroll + usize::from((row - first) / PANEL_ENTRY_HEIGHT))
}

pub fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

#[cfg(test)]
mod tests;
