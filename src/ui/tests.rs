use super::*;
use crate::app::{Focus, Message, Model, update};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Modifier};
use std::path::PathBuf;

const WIDE: (u16, u16) = (160, 30);

fn create_model(text: &str, size: (u16, u16)) -> Model {
    Model::new(Some(PathBuf::from("draft.txt")), text, size)
}

fn draw(model: &Model) -> Buffer {
    let (width, height) = model.terminal_size;
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol().to_string())
        .collect()
}

fn content(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|y| row_text(buffer, y))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Top-left cell of the first occurrence of `needle`, scanning rows.
fn find_text(buffer: &Buffer, needle: &str) -> Option<(u16, u16)> {
    (0..buffer.area.height).find_map(|y| {
        let row = row_text(buffer, y);
        let idx = row.find(needle)?;
        let x = u16::try_from(row[..idx].chars().count()).ok()?;
        Some((x, y))
    })
}

#[test]
fn test_flagged_word_is_underlined_in_editor() {
    let model = create_model("I dont know", WIDE);
    let buffer = draw(&model);

    let (x, y) = find_text(&buffer, "dont").unwrap();
    assert_eq!(y, 1, "draft text starts inside the border");
    for dx in 0..4 {
        let cell = &buffer[(x + dx, y)];
        assert!(cell.modifier.contains(Modifier::UNDERLINED));
        assert_eq!(cell.fg, Color::LightRed);
    }

    let (kx, ky) = find_text(&buffer, "know").unwrap();
    assert!(!buffer[(kx, ky)].modifier.contains(Modifier::UNDERLINED));
}

#[test]
fn test_cursor_cell_is_highlighted() {
    let model = create_model("hello", WIDE);
    let buffer = draw(&model);
    let (x, y) = find_text(&buffer, "hello").unwrap();
    assert_eq!(buffer[(x, y)].bg, Color::White);
    assert_ne!(buffer[(x + 1, y)].bg, Color::White);
}

#[test]
fn test_no_cursor_when_panel_has_focus() {
    let mut model = create_model("hello dont", WIDE);
    model.focus = Focus::Panel;
    let buffer = draw(&model);
    let (x, y) = find_text(&buffer, "hello").unwrap();
    assert_ne!(buffer[(x, y)].bg, Color::White);
}

#[test]
fn test_panel_lists_repeated_word_once() {
    let model = create_model("dont dont, Dont", WIDE);
    let buffer = draw(&model);
    let text = content(&buffer);

    assert!(text.contains("Explaining 3 corrections found in your document"));
    assert!(text.contains("1. dont \u{2192} don't [Fix]"));
    assert!(!text.contains("2. "));
    assert!(text.contains("Contraction needs an apostrophe"));
}

#[test]
fn test_panel_numbers_distinct_words() {
    let model = create_model("Todays news: peoples dont noww", WIDE);
    let text = content(&draw(&model));
    assert!(text.contains("Explaining 4 corrections found in your document"));
    assert!(text.contains("1. Todays"));
    assert!(text.contains("4. noww"));
}

#[test]
fn test_all_clear_when_no_issues() {
    let model = create_model("hello world", WIDE);
    let text = content(&draw(&model));
    assert!(text.contains("No corrections needed"));
    assert!(text.contains("All clear! No spelling or grammar issues detected."));
    assert!(text.contains("All clear"));
}

#[test]
fn test_blank_draft_shows_placeholder_only() {
    let model = create_model("", WIDE);
    let text = content(&draw(&model));
    assert!(text.contains("Paste your draft or start typing here."));
    assert!(!text.contains("All clear"));
    assert!(!text.contains("No corrections needed"));
}

#[test]
fn test_whitespace_only_draft_is_blank() {
    let model = create_model("   \n  ", WIDE);
    let text = content(&draw(&model));
    assert!(!text.contains("All clear"));
    assert!(!text.contains("Paste your draft"));
}

#[test]
fn test_status_bar_counts_every_occurrence() {
    let model = create_model("dont dont", WIDE);
    let buffer = draw(&model);
    let status = row_text(&buffer, WIDE.1 - 1);
    assert!(status.contains("draft.txt"));
    assert!(status.contains("2 issues found"));
    assert!(status.contains("F1:help"));
}

#[test]
fn test_panel_header_singular() {
    let text = content(&draw(&create_model("I dont know", WIDE)));
    assert!(text.contains("Explaining 1 correction found in your document"));
}

#[test]
fn test_status_bar_shows_cursor_line_and_column() {
    let model = update(create_model("one\ntwo three", WIDE), Message::MoveToEnd);
    let status = row_text(&draw(&model), WIDE.1 - 1);
    assert!(status.contains("Line 2/2, Col 10"));
}

#[test]
fn test_status_bar_shows_modified() {
    let model = update(create_model("hi", WIDE), Message::InsertChar('x'));
    let status = row_text(&draw(&model), WIDE.1 - 1);
    assert!(status.contains("[modified]"));
}

#[test]
fn test_hover_card_shows_suggestion() {
    let model = update(create_model("I dont know", WIDE), Message::HoverToken(2));
    assert!(model.hover.is_some());
    let buffer = draw(&model);
    let text = content(&buffer);
    assert!(text.contains("Suggestion"));
    assert!(text.contains("click to apply"));

    // The card opens on the row below the word.
    let (_, word_row) = find_text(&buffer, "dont").unwrap();
    let (_, card_row) = find_text(&buffer, "Suggestion").unwrap();
    assert_eq!(card_row, word_row + 1);
}

#[test]
fn test_hovered_word_is_emphasized() {
    let model = update(create_model("I dont know", WIDE), Message::HoverToken(2));
    let buffer = draw(&model);
    let (x, y) = find_text(&buffer, "dont").unwrap();
    assert!(buffer[(x + 1, y)].modifier.contains(Modifier::BOLD));
}

#[test]
fn test_help_overlay_starts_at_top_with_scroll_hint() {
    let model = update(create_model("hello", WIDE), Message::ToggleHelp);
    let text = content(&draw(&model));
    assert!(text.contains("Help"));
    assert!(text.contains("Corrections"));
    assert!(text.contains("j/k scroll"));
}

#[test]
fn test_help_overlay_scrolls_to_config_paths() {
    let mut model = create_model("hello", WIDE);
    model.config_global_path = Some(PathBuf::from("/tmp/typolens/conf"));
    let mut model = update(model, Message::ToggleHelp);
    for _ in 0..help_max_scroll(&model) {
        model = update(model, Message::HelpScrollDown);
    }
    let text = content(&draw(&model));
    assert!(text.contains("Global: /tmp/typolens/conf"));
    assert!(text.contains("Local override: <none>"));
    assert!(!text.contains("Hover a red word"));
}

#[test]
fn test_help_fits_without_scrolling_on_tall_terminal() {
    let model = update(create_model("hello", (160, 50)), Message::ToggleHelp);
    assert_eq!(help_max_scroll(&model), 0);
    let text = content(&draw(&model));
    assert!(text.contains("Global: <unknown>"));
    assert!(!text.contains("j/k scroll"));
}

#[test]
fn test_narrow_terminal_has_no_panel() {
    let model = create_model("dont", (50, 12));
    let text = content(&draw(&model));
    assert!(!text.contains("Issues"));
    assert!(text.contains("1 issue found"));
}

#[test]
fn test_screen_layout_with_panel() {
    let screen = screen_layout(Rect::new(0, 0, 100, 30), true, false);
    let panel = screen.panel.unwrap();
    assert_eq!(screen.editor.height, 29);
    assert_eq!(screen.status.y, 29);
    assert_eq!(screen.editor.width + panel.width, 100);
    assert_eq!(panel.x, screen.editor.width);
    assert!(screen.toast.is_none());
}

#[test]
fn test_screen_layout_toast_below_status() {
    let screen = screen_layout(Rect::new(0, 0, 80, 24), false, true);
    assert!(screen.panel.is_none());
    assert_eq!(screen.editor, Rect::new(0, 0, 80, 22));
    assert_eq!(screen.status.y, 22);
    assert_eq!(screen.toast.unwrap().y, 23);
    assert_eq!(screen.text(), Rect::new(1, 1, 78, 20));
}

#[test]
fn test_panel_entry_rows() {
    let panel = Rect::new(50, 0, 30, 20);
    // Border plus two header rows come first.
    assert_eq!(panel_entry_at(panel, 2, 0), None);
    assert_eq!(panel_entry_at(panel, 3, 0), Some(0));
    assert_eq!(panel_entry_at(panel, 5, 0), Some(0));
    assert_eq!(panel_entry_at(panel, 6, 0), Some(1));
    assert_eq!(panel_entry_at(panel, 6, 4), Some(5));
    assert_eq!(panel_entry_at(panel, 19, 0), None);
    assert_eq!(panel_capacity(panel), 5);
}

#[test]
fn test_contains_is_half_open() {
    let rect = Rect::new(2, 3, 4, 5);
    assert!(contains(rect, 2, 3));
    assert!(contains(rect, 5, 7));
    assert!(!contains(rect, 6, 3));
    assert!(!contains(rect, 2, 8));
}

#[test]
fn test_editor_lines_expand_tabs() {
    let model = create_model("a\tb", WIDE);
    let lines = render::editor_lines(&model, 5, None);
    let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(text, "a   b");
}

#[test]
fn test_editor_lines_cursor_past_line_end() {
    let model = create_model("ab\ncd", WIDE);
    let lines = render::editor_lines(&model, 5, Some(2));
    assert_eq!(lines.len(), 2);
    let last = lines[0].spans.last().unwrap();
    assert_eq!(last.content.as_ref(), " ");
    assert_eq!(last.style.bg, Some(Color::White));
    assert!(lines[1].spans.iter().all(|s| s.style.bg != Some(Color::White)));
}

#[test]
fn test_editor_lines_start_at_scroll_offset() {
    let mut model = create_model("one\ntwo\nthree", WIDE);
    model.scroll_offset = 1;
    let lines = render::editor_lines(&model, 1, None);
    assert_eq!(lines.len(), 1);
    let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(text, "two");
}
