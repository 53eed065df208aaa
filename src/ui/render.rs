use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{Focus, Model};
use crate::overlay::Row;

use super::{overlays, status, style};

/// Shown in an empty editor.
pub const PLACEHOLDER: &str = "Paste your draft or start typing here. \
Misspelled words will be highlighted in red instantly\u{2026}";

/// Render the complete UI.
///
/// Geometry comes from [`Model::screen`], the same layout the mouse handler
/// hit-tests against.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let screen = model.screen();
    let clip = |rect: Rect| rect.intersection(area);

    render_editor(model, frame, clip(screen.editor));
    if let Some(panel) = screen.panel {
        overlays::render_panel(model, frame, clip(panel));
    }
    if let Some(toast) = screen.toast {
        status::render_toast_bar(model, frame, clip(toast));
    }
    status::render_status_bar(model, frame, clip(screen.status));

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else {
        overlays::render_tooltip(model, frame, screen.text());
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Draft ")
        .borders(Borders::ALL)
        .border_style(style::border(model.focus == Focus::Editor));
    let text_area = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let show_cursor = model.focus == Focus::Editor && !model.help_visible;
    if model.buffer.is_empty() {
        frame.render_widget(
            Paragraph::new(PLACEHOLDER)
                .style(style::placeholder())
                .wrap(Wrap { trim: true }),
            text_area,
        );
        if show_cursor && !text_area.is_empty() {
            frame.buffer_mut()[(text_area.x, text_area.y)].set_style(style::cursor());
        }
        return;
    }

    let cursor = show_cursor.then(|| model.buffer.cursor());
    frame.render_widget(Paragraph::new(editor_lines(model, text_area.height, cursor)), text_area);
}

/// Styled lines for the visible rows of the draft.
pub fn editor_lines(model: &Model, height: u16, cursor: Option<usize>) -> Vec<Line<'static>> {
    let layout = &model.view().layout;
    let cursor_row = cursor.map(|offset| layout.position_of(offset).0);
    layout
        .rows()
        .iter()
        .enumerate()
        .skip(model.scroll_offset)
        .take(usize::from(height))
        .map(|(row_idx, row)| {
            let row_cursor = cursor.filter(|_| cursor_row == Some(row_idx));
            row_line(model, row, row_cursor)
        })
        .collect()
}

fn row_line(model: &Model, row: &Row, cursor: Option<usize>) -> Line<'static> {
    let notes = model.annotations();
    let hovered = model.hover.as_ref().map(|h| h.token_index);

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let mut cursor_drawn = false;

    for glyph in &row.glyphs {
        let mut glyph_style = if hovered == Some(glyph.token_index) {
            style::flagged_hovered()
        } else if notes.is_flagged(glyph.token_index) {
            style::flagged()
        } else {
            Style::default()
        };
        if cursor == Some(glyph.offset) {
            glyph_style = glyph_style.patch(style::cursor());
            cursor_drawn = true;
        }
        if glyph_style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = glyph_style;
        if glyph.ch.is_whitespace() {
            run.extend(std::iter::repeat_n(' ', usize::from(glyph.width)));
        } else {
            run.push(glyph.ch);
        }
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    // The cursor sits past the last glyph, on a line break or the end.
    if cursor.is_some() && !cursor_drawn {
        spans.push(Span::styled(" ", style::cursor()));
    }
    Line::from(spans)
}
