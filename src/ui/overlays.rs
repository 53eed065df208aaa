use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::app::{Focus, Model};
use crate::overlay::{TOOLTIP_HEIGHT, TOOLTIP_WIDTH};

use super::{panel_capacity, style};

/// Panel header for `count` flagged words, repeats included.
pub fn panel_header(count: usize) -> String {
    match count {
        0 => "No corrections needed".to_string(),
        1 => "Explaining 1 correction found in your document".to_string(),
        n => format!("Explaining {n} corrections found in your document"),
    }
}

pub fn render_panel(model: &Model, frame: &mut Frame, area: Rect) {
    let focused = model.focus == Focus::Panel;
    let block = Block::default()
        .title(" Issues ")
        .borders(Borders::ALL)
        .border_style(style::border(focused));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let notes = model.annotations();
    // Nothing to explain until there is something to read.
    if notes.text().trim().is_empty() {
        return;
    }

    let rows = notes.explanations();
    let mut lines: Vec<Line> = vec![
        Line::styled(panel_header(notes.issue_count()), style::panel_header()),
        Line::raw(""),
    ];

    if rows.is_empty() {
        lines.push(Line::styled(
            "All clear! No spelling or grammar issues detected.",
            style::all_clear(),
        ));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        return;
    }

    for (idx, row) in rows
        .iter()
        .enumerate()
        .skip(model.panel_scroll)
        .take(panel_capacity(area))
    {
        let mut first = Line::from(vec![
            Span::raw(format!("{}. ", idx + 1)),
            Span::styled(row.word.clone(), style::wrong_word()),
            Span::raw(" \u{2192} "),
            Span::styled(row.correction.clone(), style::right_word()),
            Span::raw(" "),
            Span::styled("[Fix]", style::fix_button()),
        ]);
        if focused && idx == model.panel_selected {
            first = first.patch_style(Style::default().add_modifier(Modifier::REVERSED));
        }
        lines.push(first);
        lines.push(Line::styled(format!("   {}", row.reason), style::reason()));
        lines.push(Line::raw(""));
    }
    // No wrapping: every entry must stay three rows for mouse hit-testing.
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Draw the hover card over the editor text area `text`.
pub fn render_tooltip(model: &Model, frame: &mut Frame, text: Rect) {
    let Some(hover) = &model.hover else {
        return;
    };
    let card = Rect::new(
        text.x.saturating_add(hover.position.left),
        text.y.saturating_add(hover.position.top),
        TOOLTIP_WIDTH,
        TOOLTIP_HEIGHT,
    )
    .intersection(frame.area());
    if card.is_empty() {
        return;
    }

    let block = Block::default()
        .title(" Suggestion ")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(style::popup());
    let inner = block.inner(card);
    frame.render_widget(Clear, card);
    frame.render_widget(block, card);

    let body_height = inner.height.saturating_sub(1);
    let body = vec![
        Line::from(vec![
            Span::styled(hover.word.clone(), style::wrong_word()),
            Span::raw(" \u{2192} "),
            Span::styled(hover.suggestion.correction.clone(), style::right_word()),
        ]),
        Line::styled(hover.suggestion.reason.clone(), style::reason()),
    ];
    frame.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: true }),
        Rect::new(inner.x, inner.y, inner.width, body_height),
    );
    if inner.height > 0 {
        frame.render_widget(
            Paragraph::new(Line::styled("click to apply", style::hint())),
            Rect::new(inner.x, inner.y + body_height, inner.width, 1),
        );
    }
}

/// Every line of the help text, before scrolling.
pub fn help_lines(model: &Model) -> Vec<Line<'static>> {
    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let mut lines: Vec<Line<'static>> = Vec::new();

    lines.push(Line::styled("Corrections", style::section()));
    lines.push(Line::raw("  Hover a red word      Show its suggestion"));
    lines.push(Line::raw("  Click a red word      Apply the fix"));
    lines.push(Line::raw("  Tab                   Switch editor / panel"));
    lines.push(Line::raw("  Up/Down, Enter        Pick and fix (panel)"));
    lines.push(Line::raw("  1-9                   Fix entry (panel)"));
    lines.push(Line::raw("  Ctrl-p                Toggle panel"));
    lines.push(Line::raw("  Ctrl-r                Reload suggestions"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Editor", style::section()));
    lines.push(Line::raw("  Arrows, Home/End      Navigate"));
    lines.push(Line::raw("  Ctrl+Left/Right       Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End         Draft start / end"));
    lines.push(Line::raw("  PageUp/PageDown       Scroll"));
    lines.push(Line::raw("  Ctrl-s                Save"));
    lines.push(Line::raw("  Ctrl-o                Import from file"));
    lines.push(Line::raw("  Ctrl-l                Join pages with blank lines"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", style::section()));
    lines.push(Line::raw("  Esc                   Close card / help"));
    lines.push(Line::raw("  Ctrl-q / Ctrl-c       Quit"));
    lines.push(Line::raw("  F1                    Toggle help"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", style::section()));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines
}

fn help_popup(area: Rect) -> Rect {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    centered_popup_rect(popup_width, popup_height, area)
}

/// Inner area: border(1) + padding(1) on each side.
fn help_inner(popup: Rect) -> Rect {
    Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    )
}

/// Largest useful help scroll offset for the current terminal size.
pub fn help_max_scroll(model: &Model) -> usize {
    let (width, height) = model.terminal_size;
    let inner = help_inner(help_popup(Rect::new(0, 0, width, height)));
    // One row is reserved for the footer.
    let content_height = usize::from(inner.height.saturating_sub(1));
    help_lines(model).len().saturating_sub(content_height)
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup = help_popup(area);
    let all_lines = help_lines(model);

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(style::popup());

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let inner = help_inner(popup);
    let content_height_u16 = inner.height.saturating_sub(1);
    let content_height = usize::from(content_height_u16);
    let max_scroll = all_lines.len().saturating_sub(content_height);
    let scroll = model.help_scroll_offset.min(max_scroll);
    let end = (scroll + content_height).min(all_lines.len());
    let visible = all_lines[scroll..end].to_vec();

    frame.render_widget(
        Paragraph::new(visible),
        Rect::new(inner.x, inner.y, inner.width, content_height_u16),
    );

    let footer = if max_scroll > 0 {
        "j/k scroll \u{2502} any other key or click closes"
    } else {
        "any key or click closes"
    };
    frame.render_widget(
        Paragraph::new(Line::styled(footer, style::hint())),
        Rect::new(inner.x, inner.y + content_height_u16, inner.width, 1),
    );
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
