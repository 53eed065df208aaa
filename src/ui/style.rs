//! Theming and color definitions.
//!
//! Uses ANSI colors that adapt to the terminal's color palette. Flagged
//! words keep their text readable and gain a red underline over a faint
//! red tint, the terminal version of a wavy spelling underline.

use ratatui::style::{Color, Modifier, Style};

use crate::app::ToastLevel;

/// A token with a suggestion.
pub fn flagged() -> Style {
    Style::default()
        .fg(Color::LightRed)
        .bg(Color::Indexed(52))
        .underline_color(Color::Red)
        .add_modifier(Modifier::UNDERLINED)
}

/// The flagged token whose card is open.
pub fn flagged_hovered() -> Style {
    flagged()
        .fg(Color::White)
        .bg(Color::Indexed(88))
        .add_modifier(Modifier::BOLD)
}

/// The cell under the editor cursor.
pub fn cursor() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn placeholder() -> Style {
    Style::default()
        .fg(Color::Indexed(245))
        .add_modifier(Modifier::ITALIC)
}

pub fn border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

/// The misspelled word in the panel and the card.
pub fn wrong_word() -> Style {
    Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// The replacement in the panel and the card.
pub fn right_word() -> Style {
    Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD)
}

pub fn reason() -> Style {
    Style::default().fg(Color::Indexed(245))
}

pub fn hint() -> Style {
    Style::default()
        .fg(Color::Indexed(245))
        .add_modifier(Modifier::DIM)
}

pub fn fix_button() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn panel_header() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn all_clear() -> Style {
    Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD)
}

/// Background of popups: the hover card and help.
pub fn popup() -> Style {
    Style::default().bg(Color::Black).fg(Color::White)
}

pub fn status_bar() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Status bar while new suggestions are on their way.
pub fn status_bar_generating() -> Style {
    Style::default().bg(Color::Magenta).fg(Color::White)
}

pub fn section() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Label and colors for a toast.
pub fn toast(level: ToastLevel) -> (&'static str, Style) {
    match level {
        ToastLevel::Info => ("[info]", Style::default().bg(Color::DarkGray).fg(Color::White)),
        ToastLevel::Warning => ("[warn]", Style::default().bg(Color::Yellow).fg(Color::Black)),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    }
}
