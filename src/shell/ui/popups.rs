use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::helpers::{centered_rect, key_hint, panel};
use crate::flows::{ActionHandoffFlow, ConfirmationFlow, HandoffKind, HandoffStatus};
use crate::icons::Icons;
use crate::nav::{ScreenId, SessionGate};
use crate::shell::Shell;
use crate::theme::Theme;

fn separator() -> Line<'static> {
    Line::from(Span::styled(
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━",
        Style::default().fg(Theme::DIM),
    ))
}

impl Shell {
    pub fn render_side_menu(&self, f: &mut Frame, area: Rect) {
        let width = 30.min(area.width);
        let menu_area = Rect::new(area.x, area.y, width, area.height);
        f.render_widget(Clear, menu_area);

        let items: Vec<ListItem> = ScreenId::MENU
            .iter()
            .enumerate()
            .map(|(idx, screen)| {
                let selected = idx == self.menu.selected;
                let allowed = SessionGate.authorize(*screen, &self.session).is_allowed();
                let icon = if allowed { Icons::for_screen(*screen) } else { Icons::LOCKED };
                let marker = if selected { "▶ " } else { "  " };

                let style = match (selected, allowed) {
                    (true, _) => Style::default().fg(Theme::BASE).bg(Theme::selection()).add_modifier(Modifier::BOLD),
                    (false, true) => Style::default().fg(Theme::TEXT),
                    (false, false) => Style::default().fg(Theme::DIM),
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{marker}{icon} {}", screen.title()),
                    style,
                )))
            })
            .collect();

        f.render_widget(List::new(items).block(panel(&format!("{} MENU", Icons::MENU))), menu_area);
    }

    pub fn render_confirm_popup(&self, f: &mut Frame, area: Rect, flow: &ConfirmationFlow) {
        let popup_area = centered_rect(60, 50, area);
        f.render_widget(Clear, popup_area);

        let mut lines = vec![Line::from("")];
        for (label, value) in flow.summary() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", label), Style::default().fg(Theme::header()).add_modifier(Modifier::BOLD)),
                Span::styled(value, Style::default().fg(Theme::TEXT)),
            ]));
        }
        lines.push(Line::from(""));

        if let Some(error) = &self.modal_error {
            lines.push(Line::from(Span::styled(
                format!("  ✗ {error}"),
                Style::default().fg(Theme::error()),
            )));
            lines.push(Line::from(""));
        }

        lines.push(separator());
        if flow.actions_enabled() {
            let mut hints = key_hint("ENTER", "Confirm");
            hints.extend(key_hint("N", "Cancel"));
            lines.push(Line::from(hints));
        } else {
            lines.push(Line::from(Span::styled(
                format!("  {} Processing{}", Icons::LOADING, self.get_animated_dots()),
                Style::default().fg(Theme::info()).add_modifier(Modifier::BOLD),
            )));
        }

        let title = format!("CONFIRM {}", flow.state().operation_type.label().to_uppercase());
        let paragraph = Paragraph::new(lines).block(panel(&title)).wrap(Wrap { trim: false });
        f.render_widget(paragraph, popup_area);
    }

    pub fn render_handoff_popup(&self, f: &mut Frame, area: Rect, flow: &ActionHandoffFlow, now: Instant) {
        let popup_area = centered_rect(70, 50, area);
        f.render_widget(Clear, popup_area);

        let (icon, title, instruction) = match flow.kind() {
            HandoffKind::Dial => (
                Icons::PHONE,
                "DIAL",
                "Complete the request on your phone, then come back and press ENTER.",
            ),
            HandoffKind::Redirect => (
                Icons::LINK,
                "PAYMENT",
                "Finish the payment in your browser, then come back and press ENTER.",
            ),
        };

        let status = match flow.status() {
            HandoffStatus::Idle | HandoffStatus::Pending => {
                Span::styled("Not opened yet", Style::default().fg(Theme::warning()))
            }
            HandoffStatus::Attempted => Span::styled(
                format!("Requested {} time(s)", flow.attempts()),
                Style::default().fg(Theme::success()),
            ),
            HandoffStatus::Completed => Span::styled("Done", Style::default().fg(Theme::success())),
        };

        let copied = if flow.is_copied(now) {
            Span::styled(format!("  {} Copied", Icons::COPIED), Style::default().fg(Theme::success()).add_modifier(Modifier::BOLD))
        } else {
            Span::raw("")
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(3)])
            .split(popup_area);

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("  {icon} "), Style::default().fg(Theme::MOMO_YELLOW)),
                Span::styled(flow.payload().to_string(), Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD)),
                copied,
            ]),
            Line::from(""),
            Line::from(vec![Span::styled("  Status: ", Style::default().fg(Theme::header())), status]),
            Line::from(""),
            Line::from(Span::styled(format!("  {instruction}"), Style::default().fg(Theme::SUBTEXT))),
        ];
        let body = Paragraph::new(lines).block(panel(title)).wrap(Wrap { trim: false });
        f.render_widget(body, chunks[0]);

        let mut hints = key_hint("R", flow.attempt_label());
        hints.extend(key_hint("C", "Copy"));
        hints.extend(key_hint("ENTER", "Done"));
        hints.extend(key_hint("ESC", "Close"));
        f.render_widget(Paragraph::new(Line::from(hints)).block(panel("ACTIONS")), chunks[1]);
    }
}
