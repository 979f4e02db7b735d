use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Gauge, Paragraph},
    Frame,
};

use super::helpers::{centered_rect, key_hint, panel};
use crate::icons::Icons;
use crate::nav::ScreenId;
use crate::shell::{Modal, Shell};
use crate::theme::Theme;

impl Shell {
    pub fn ui(&self, f: &mut Frame, now: Instant) {
        let size = f.area();
        f.render_widget(Block::default().style(Style::default().bg(Theme::BASE)), size);

        if let Some(splash) = &self.splash {
            self.render_splash(f, size, splash.progress(now));
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(8),    // Screen
                Constraint::Length(4), // Footer + status
            ])
            .split(size);

        self.render_header(f, chunks[0]);

        let body = chunks[1];
        match self.current() {
            ScreenId::Splash => self.render_splash(f, body, 1.0),
            ScreenId::Landing => self.render_landing(f, body),
            ScreenId::Login => self.render_login(f, body),
            ScreenId::Dashboard => self.render_dashboard(f, body),
            ScreenId::Deposit | ScreenId::Withdraw => self.render_money_form(f, body),
            ScreenId::Recharge => self.render_recharge(f, body),
            ScreenId::Transfer => self.render_transfer(f, body),
            ScreenId::History => self.render_history(f, body),
            ScreenId::Settings => self.render_settings(f, body),
            ScreenId::Profile => self.render_profile(f, body),
            ScreenId::PermissionDenied => self.render_permission_denied(f, body),
        }

        self.render_footer(f, chunks[2]);

        if self.menu.open {
            self.render_side_menu(f, size);
        }

        match &self.modal {
            Some(Modal::Confirm(flow)) => self.render_confirm_popup(f, size, flow),
            Some(Modal::Handoff(flow)) => self.render_handoff_popup(f, size, flow, now),
            None => {}
        }
    }

    fn render_splash(&self, f: &mut Frame, area: Rect, progress: f64) {
        let splash_area = centered_rect(50, 30, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(splash_area);

        let title = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "M O M O   W A L L E T",
                Style::default().fg(Theme::MOMO_YELLOW).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Loading{}", self.get_animated_dots()),
                Style::default().fg(Theme::SUBTEXT),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let gauge = Gauge::default()
            .block(panel("STARTING"))
            .gauge_style(Style::default().fg(Theme::MOMO_YELLOW).bg(Theme::SURFACE))
            .ratio(progress.clamp(0.0, 1.0));
        f.render_widget(gauge, chunks[1]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(34)])
            .split(area);

        // breadcrumb of the navigation stack
        let mut trail = vec![Span::styled(
            format!("{} MOMO WALLET ", Icons::WALLET),
            Style::default().fg(Theme::MOMO_YELLOW).add_modifier(Modifier::BOLD),
        )];
        for screen in self.nav.stack() {
            trail.push(Span::styled(
                format!(" {} ", Icons::ARROW_RIGHT),
                Style::default().fg(Theme::DIM),
            ));
            let style = if *screen == self.current() {
                Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Theme::SUBTEXT)
            };
            trail.push(Span::styled(screen.title(), style));
        }
        f.render_widget(Paragraph::new(Line::from(trail)).block(panel("NAVIGATION")), chunks[0]);

        let account = match &self.session.user {
            Some(user) if self.session.is_authenticated => {
                let badge = if user.is_verified {
                    Span::styled(format!(" {}", Icons::VERIFIED), Style::default().fg(Theme::success()))
                } else {
                    Span::styled(" unverified", Style::default().fg(Theme::warning()))
                };
                Line::from(vec![
                    Span::styled(user.name.clone(), Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD)),
                    badge,
                ])
            }
            _ => Line::from(Span::styled("Guest", Style::default().fg(Theme::SUBTEXT))),
        };
        f.render_widget(
            Paragraph::new(account).alignment(Alignment::Right).block(panel("ACCOUNT")),
            chunks[1],
        );
    }

    fn footer_hints(&self) -> Vec<(&'static str, &'static str)> {
        if let Some(modal) = &self.modal {
            return match modal {
                Modal::Confirm(flow) if flow.is_processing() => vec![("…", "Processing")],
                Modal::Confirm(_) => vec![("ENTER", "Confirm"), ("N/ESC", "Cancel")],
                Modal::Handoff(_) => vec![("R", "Retry"), ("C", "Copy"), ("ENTER", "Done"), ("ESC", "Close")],
            };
        }
        if self.menu.open {
            return vec![("↑↓", "Select"), ("ENTER", "Open"), ("ESC", "Close")];
        }

        let mut hints = match self.current() {
            ScreenId::Landing => vec![("ENTER", "Sign in")],
            ScreenId::Login => vec![("TAB", "Next field"), ("ENTER", "Sign in")],
            ScreenId::Deposit | ScreenId::Withdraw => {
                vec![("TAB", "Next field"), ("←→", "Network"), ("ENTER", "Continue")]
            }
            ScreenId::Recharge => vec![("ENTER", "Dial")],
            ScreenId::Dashboard | ScreenId::Profile => vec![("U", "Refresh")],
            ScreenId::Settings => vec![("L", "Sign out")],
            ScreenId::PermissionDenied => vec![("ENTER", "Go back"), ("P", "Profile")],
            ScreenId::Splash | ScreenId::Transfer | ScreenId::History => Vec::new(),
        };

        if self.session.is_authenticated && !self.is_form_screen() {
            hints.push(("M", "Menu"));
        }
        if self.nav.can_go_back() {
            hints.push(("ESC", "Back"));
        } else {
            hints.push(("Q", "Quit"));
        }
        hints
    }

    pub fn is_form_screen(&self) -> bool {
        matches!(
            self.current(),
            ScreenId::Login | ScreenId::Deposit | ScreenId::Withdraw | ScreenId::Recharge
        )
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let hints = self.footer_hints();
        let spans: Vec<Span> = hints
            .iter()
            .flat_map(|(key, label)| key_hint(key, label))
            .collect();
        f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

        // latest notice wins over the status line
        let status = if let Some(notice) = self.notices.latest() {
            Line::from(Span::styled(
                format!("{} {}", Icons::INFO, notice.message),
                Style::default().fg(Theme::notice(notice.level)).add_modifier(Modifier::BOLD),
            ))
        } else if let Some(message) = &self.status_message {
            Line::from(Span::styled(message.clone(), Style::default().fg(Theme::SUBTEXT)))
        } else {
            Line::from("")
        };
        f.render_widget(Paragraph::new(status), chunks[1]);
    }
}
