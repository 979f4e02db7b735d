use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
};

use crate::shell::Shell;
use crate::theme::Theme;

/// Helper function to create a centered rectangle
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Bordered panel with the shell's title style.
pub fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::BORDER).add_modifier(Modifier::BOLD))
        .border_type(BorderType::Double)
        .title(format!(" ┃ {} ┃ ", title))
        .title_style(Style::default().fg(Theme::header()).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Theme::BASE))
}

/// `[KEY] label` badge used in footers and dialogs.
pub fn key_hint<'a>(key: &'a str, label: &'a str) -> Vec<Span<'a>> {
    vec![
        Span::styled(
            format!(" {} ", key),
            Style::default().fg(Theme::BASE).bg(Theme::MOMO_YELLOW).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}  ", label), Style::default().fg(Theme::TEXT)),
    ]
}

/// One labelled input line; the focused one gets a cursor and the accent.
pub fn input_line<'a>(label: &'a str, value: String, focused: bool, blink: bool) -> Line<'a> {
    let marker = if focused { "▶ " } else { "  " };
    let cursor = if focused && blink { "█" } else { " " };
    let value_style = if focused {
        Style::default().fg(Theme::TEXT).bg(Theme::SURFACE).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Theme::SUBTEXT)
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(Theme::selection())),
        Span::styled(format!("{:<10}", label), Style::default().fg(Theme::header()).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}{} ", value, cursor), value_style),
    ])
}

impl Shell {
    pub fn get_animated_dots(&self) -> &'static str {
        match self.animation_frame % 4 {
            0 => "   ",
            1 => ".  ",
            2 => ".. ",
            _ => "...",
        }
    }

    /// Cursor blink phase.
    pub fn get_pulse_color_bright(&self) -> bool {
        (self.animation_frame / 5) % 2 == 0
    }
}
