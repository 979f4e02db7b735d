use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table, Wrap},
    Frame,
};

use super::helpers::{input_line, panel};
use crate::flows::OperationType;
use crate::icons::Icons;
use crate::nav::{Decision, Requirement, ScreenId, SessionGate};
use crate::shell::{LoginField, MoneyField, Shell};
use crate::theme::Theme;

fn label_row<'a>(label: &'a str, value: String) -> Row<'a> {
    Row::new(vec![
        Line::from(Span::styled(label, Style::default().fg(Theme::header()))),
        Line::from(Span::styled(value, Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD))),
    ])
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("---").to_string()
}

impl Shell {
    pub fn render_landing(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Mobile money in your terminal",
                Style::default().fg(Theme::MOMO_YELLOW).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Deposit, withdraw and recharge airtime from one wallet.",
                Style::default().fg(Theme::SUBTEXT),
            )),
            Line::from(""),
            Line::from(Span::styled("Press ENTER to sign in.", Style::default().fg(Theme::TEXT))),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel(ScreenId::Landing.title()));
        f.render_widget(paragraph, area);
    }

    pub fn render_login(&self, f: &mut Frame, area: Rect) {
        let form = &self.login_form;
        let blink = self.get_pulse_color_bright();

        let mut lines = vec![
            Line::from(""),
            input_line("Phone", form.phone.clone(), form.focused == LoginField::Phone, blink),
            Line::from(""),
            input_line(
                "Password",
                "•".repeat(form.password.chars().count()),
                form.focused == LoginField::Password,
                blink,
            ),
            Line::from(""),
        ];

        for (field, message) in &form.errors {
            lines.push(Line::from(Span::styled(
                format!("  ✗ {field}: {message}"),
                Style::default().fg(Theme::error()),
            )));
        }

        if self.status_message.is_some() {
            lines.push(Line::from(Span::styled(
                format!("  {} Signing in{}", Icons::LOADING, self.get_animated_dots()),
                Style::default().fg(Theme::info()),
            )));
        }

        f.render_widget(Paragraph::new(lines).block(panel(ScreenId::Login.title())), area);
    }

    pub fn render_dashboard(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let user = self.session.user.as_ref();
        let rows = vec![
            label_row("Balance", or_dash(user.and_then(|u| u.balance.as_deref()))),
            label_row("Phone", or_dash(user.map(|u| u.phone.as_str()))),
            label_row(
                "Status",
                if user.is_some_and(|u| u.is_verified) { "Verified" } else { "Unverified" }.to_string(),
            ),
        ];
        let summary = Table::new(rows, [Constraint::Length(10), Constraint::Min(12)])
            .block(panel("WALLET SUMMARY"))
            .column_spacing(2);
        f.render_widget(summary, chunks[0]);

        let actions = [
            ('D', ScreenId::Deposit, "Fund the wallet from mobile money"),
            ('W', ScreenId::Withdraw, "Cash out to a mobile money number"),
            ('R', ScreenId::Recharge, "Dial a USSD airtime code"),
            ('T', ScreenId::Transfer, "Send to another wallet"),
            ('H', ScreenId::History, "Recent operations"),
            ('P', ScreenId::Profile, "Account details"),
            ('S', ScreenId::Settings, "API and sign out"),
        ];
        let rows: Vec<Row> = actions
            .iter()
            .map(|(key, screen, description)| {
                let locked = !self.nav_gate_allows(*screen);
                let name_style = if locked {
                    Style::default().fg(Theme::DIM)
                } else {
                    Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD)
                };
                let icon = if locked { Icons::LOCKED } else { Icons::for_screen(*screen) };
                Row::new(vec![
                    Line::from(Span::styled(key.to_string(), Style::default().fg(Theme::selection()).add_modifier(Modifier::BOLD))),
                    Line::from(Span::styled(format!("{icon} {}", screen.title()), name_style)),
                    Line::from(Span::styled(*description, Style::default().fg(Theme::SUBTEXT))),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [Constraint::Length(3), Constraint::Length(16), Constraint::Min(20)],
        )
        .block(panel("QUICK ACTIONS"))
        .column_spacing(2);
        f.render_widget(table, chunks[1]);
    }

    /// Whether the gate would let the current session in.
    fn nav_gate_allows(&self, screen: ScreenId) -> bool {
        SessionGate.authorize(screen, &self.session).is_allowed()
    }

    pub fn render_money_form(&self, f: &mut Frame, area: Rect) {
        let Some(operation) = self.money_operation() else {
            return;
        };
        let form = &self.money_form;
        let blink = self.get_pulse_color_bright() && self.modal.is_none();

        let network = self
            .config
            .networks
            .get(form.network_index)
            .map(|n| format!("< {} >", n.name))
            .unwrap_or_else(|| "(no networks configured)".to_string());

        let hint = match operation {
            OperationType::Deposit => "Money is pulled from this number after you approve it on your phone.",
            OperationType::Withdrawal => "Money is sent to this number.",
        };

        let mut lines = vec![
            Line::from(""),
            input_line("Amount", form.amount.clone(), form.focused == MoneyField::Amount, blink),
            Line::from(""),
            input_line("Phone", form.phone.clone(), form.focused == MoneyField::Phone, blink),
            Line::from(""),
            input_line("Network", network, form.focused == MoneyField::Network, false),
            Line::from(""),
            Line::from(Span::styled(format!("  {hint}"), Style::default().fg(Theme::SUBTEXT))),
        ];
        if form.phone.is_empty() {
            if let Some(user) = &self.session.user {
                lines.push(Line::from(Span::styled(
                    format!("  Leave the phone empty to use {}", user.phone),
                    Style::default().fg(Theme::DIM),
                )));
            }
        }

        let title = self.current().title();
        f.render_widget(Paragraph::new(lines).block(panel(title)), area);
    }

    pub fn render_recharge(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            input_line("USSD code", self.recharge_code.clone(), true, self.get_pulse_color_bright()),
            Line::from(""),
            Line::from(Span::styled(
                format!("  {} The code is handed to your phone's dialer, e.g. *123#", Icons::PHONE),
                Style::default().fg(Theme::SUBTEXT),
            )),
        ];
        f.render_widget(Paragraph::new(lines).block(panel(ScreenId::Recharge.title())), area);
    }

    pub fn render_transfer(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} Wallet to wallet transfers", Icons::TRANSFER),
                Style::default().fg(Theme::TEXT).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Transfers between wallets are made with your phone number as the recipient id.",
                Style::default().fg(Theme::SUBTEXT),
            )),
            Line::from(Span::styled(
                "Use Withdraw to send money to any mobile money number.",
                Style::default().fg(Theme::SUBTEXT),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(panel(ScreenId::Transfer.title()));
        f.render_widget(paragraph, area);
    }

    pub fn render_history(&self, f: &mut Frame, area: Rect) {
        let Some(receipt) = &self.last_receipt else {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No operations in this session yet.",
                Style::default().fg(Theme::SUBTEXT),
            )))
            .block(panel(ScreenId::History.title()));
            f.render_widget(empty, area);
            return;
        };

        let rows = vec![
            label_row("Message", receipt.message.clone()),
            label_row("Reference", or_dash(receipt.reference.as_deref())),
            label_row("USSD code", or_dash(receipt.ussd_code.as_deref())),
            label_row("Payment", or_dash(receipt.payment_url.as_deref())),
        ];
        let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(20)])
            .block(panel(ScreenId::History.title()))
            .column_spacing(2);
        f.render_widget(table, area);
    }

    pub fn render_settings(&self, f: &mut Frame, area: Rect) {
        let networks = self
            .config
            .networks
            .iter()
            .map(|n| n.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let rows = vec![
            label_row("API URL", self.config.api_url.clone()),
            label_row("Last login", or_dash(self.config.last_login.as_deref())),
            label_row("Networks", networks),
            label_row("Sign out", "press L".to_string()),
        ];
        let table = Table::new(rows, [Constraint::Length(12), Constraint::Min(20)])
            .block(panel(ScreenId::Settings.title()))
            .column_spacing(2);
        f.render_widget(table, area);
    }

    pub fn render_profile(&self, f: &mut Frame, area: Rect) {
        let Some(user) = &self.session.user else {
            f.render_widget(Paragraph::new("Not signed in").block(panel(ScreenId::Profile.title())), area);
            return;
        };

        let rows = vec![
            label_row("Name", user.name.clone()),
            label_row("Email", or_dash(user.email.as_deref())),
            label_row("Phone", user.phone.clone()),
            label_row("Verified", if user.is_verified { "yes" } else { "no" }.to_string()),
            label_row("Balance", or_dash(user.balance.as_deref())),
            label_row("Member since", or_dash(user.created_at.as_deref())),
        ];
        let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(20)])
            .block(panel(ScreenId::Profile.title()))
            .column_spacing(2);
        f.render_widget(table, area);
    }

    pub fn render_permission_denied(&self, f: &mut Frame, area: Rect) {
        let reason = match self.nav.last_rejection() {
            Some(rejection) => {
                let needs = match (rejection.target.requirement(), rejection.decision) {
                    (Requirement::Capability(_), Decision::DenyToPermissionDenied) => "a verified account",
                    _ => "more permissions",
                };
                format!("{} needs {}.", rejection.target.title(), needs)
            }
            None => "This screen is not available for your account.".to_string(),
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} {}", Icons::LOCKED, reason),
                Style::default().fg(Theme::error()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Complete verification from your profile, then try again.",
                Style::default().fg(Theme::SUBTEXT),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(panel(ScreenId::PermissionDenied.title()));
        f.render_widget(paragraph, area);
    }
}
