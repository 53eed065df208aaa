use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::style;

/// Issue summary for the status bar; empty for a blank draft.
pub fn issue_summary(model: &Model) -> String {
    let notes = model.annotations();
    if notes.text().trim().is_empty() {
        return String::new();
    }
    match notes.issue_count() {
        0 => "All clear".to_string(),
        1 => "1 issue found".to_string(),
        n => format!("{n} issues found"),
    }
}

pub fn status_text(model: &Model) -> String {
    let dirty_indicator = if model.is_dirty() { " [modified]" } else { "" };
    let (line, col) = model.buffer.cursor_line_col();
    let mut status = format!(
        " {}{}  Line {}/{}, Col {}",
        model.file_name(),
        dirty_indicator,
        line + 1,
        model.buffer.line_count(),
        col + 1
    );

    let issues = issue_summary(model);
    if !issues.is_empty() {
        status.push_str("  ");
        status.push_str(&issues);
    }
    if let Some(report) = &model.report {
        let usable = report.usable_changes();
        let plural = if usable == 1 { "" } else { "s" };
        status.push_str(&format!("  AI: {usable} suggestion{plural}"));
        if let Some(consistency) = report.consistency.as_ref().filter(|c| !c.tone.is_empty()) {
            status.push_str(&format!(
                "  Tone: {}  Score: {:.0}",
                consistency.tone, consistency.score
            ));
        }
    }
    if model.generating {
        status.push_str(" [generating]");
    }
    if model.watch_enabled {
        status.push_str(" [watching]");
    }
    status.push_str("  F1:help");
    status
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let bar_style = if model.generating {
        style::status_bar_generating()
    } else {
        style::status_bar()
    };
    let status_bar = Paragraph::new(status_text(model)).style(bar_style);
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, toast_style) = style::toast(level);
    let toast = Paragraph::new(format!("{prefix} {message}")).style(toast_style);
    frame.render_widget(toast, area);
}
