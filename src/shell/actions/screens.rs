use crossterm::event::KeyCode;

use crate::nav::ScreenId;
use crate::shell::{App, LoginField, MoneyField};

fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || c == '+'
}

fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

fn is_ussd_char(c: char) -> bool {
    c.is_ascii_digit() || c == '*' || c == '#'
}

impl App {
    pub fn handle_screen_key(&mut self, code: KeyCode) {
        match self.shell.current() {
            ScreenId::Login => self.handle_login_key(code),
            ScreenId::Deposit | ScreenId::Withdraw => self.handle_money_key(code),
            ScreenId::Recharge => self.handle_recharge_key(code),
            screen => self.handle_browse_key(screen, code),
        }
    }

    /// Screens without text input.
    fn handle_browse_key(&mut self, screen: ScreenId, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.shell.should_quit = true,
            KeyCode::Char('m') if self.shell.session.is_authenticated => self.toggle_menu(),
            _ => {}
        }

        match (screen, code) {
            (ScreenId::Landing, KeyCode::Enter) | (ScreenId::Landing, KeyCode::Char('l')) => {
                self.shell.go(ScreenId::Login);
            }
            (ScreenId::Landing, KeyCode::Char('d')) => self.shell.go(ScreenId::Dashboard),

            (ScreenId::Dashboard, KeyCode::Char(c)) => {
                let target = match c {
                    'd' => ScreenId::Deposit,
                    'w' => ScreenId::Withdraw,
                    'r' => ScreenId::Recharge,
                    't' => ScreenId::Transfer,
                    'h' => ScreenId::History,
                    'p' => ScreenId::Profile,
                    's' => ScreenId::Settings,
                    'u' => {
                        self.refresh_profile();
                        return;
                    }
                    _ => return,
                };
                self.shell.go(target);
            }

            (ScreenId::Profile, KeyCode::Char('u')) => self.refresh_profile(),
            (ScreenId::Settings, KeyCode::Char('l')) => self.logout(),
            (ScreenId::PermissionDenied, KeyCode::Enter) => {
                self.shell.nav.back();
            }
            (ScreenId::PermissionDenied, KeyCode::Char('p')) => self.shell.go(ScreenId::Profile),
            _ => {}
        }
    }

    fn handle_login_key(&mut self, code: KeyCode) {
        let form = &mut self.shell.login_form;
        match code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                form.focused = match form.focused {
                    LoginField::Phone => LoginField::Password,
                    LoginField::Password => LoginField::Phone,
                };
            }
            KeyCode::Char(c) => match form.focused {
                LoginField::Phone if is_phone_char(c) => form.phone.push(c),
                LoginField::Password => form.password.push(c),
                _ => {}
            },
            KeyCode::Backspace => {
                match form.focused {
                    LoginField::Phone => form.phone.pop(),
                    LoginField::Password => form.password.pop(),
                };
            }
            KeyCode::Enter => {
                if form.focused == LoginField::Phone {
                    form.focused = LoginField::Password;
                } else {
                    self.submit_login();
                }
            }
            _ => {}
        }
    }

    fn handle_money_key(&mut self, code: KeyCode) {
        let network_count = self.shell.config.networks.len();
        let form = &mut self.shell.money_form;

        match code {
            KeyCode::Tab | KeyCode::Down => {
                form.focused = match form.focused {
                    MoneyField::Amount => MoneyField::Phone,
                    MoneyField::Phone => MoneyField::Network,
                    MoneyField::Network => MoneyField::Amount,
                };
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focused = match form.focused {
                    MoneyField::Amount => MoneyField::Network,
                    MoneyField::Phone => MoneyField::Amount,
                    MoneyField::Network => MoneyField::Phone,
                };
            }
            KeyCode::Left if form.focused == MoneyField::Network && network_count > 0 => {
                form.network_index = (form.network_index + network_count - 1) % network_count;
            }
            KeyCode::Right if form.focused == MoneyField::Network && network_count > 0 => {
                form.network_index = (form.network_index + 1) % network_count;
            }
            KeyCode::Char(c) => match form.focused {
                MoneyField::Amount if is_amount_char(c) => {
                    // one decimal point only
                    if c != '.' || !form.amount.contains('.') {
                        form.amount.push(c);
                    }
                }
                MoneyField::Phone if is_phone_char(c) => form.phone.push(c),
                _ => {}
            },
            KeyCode::Backspace => {
                match form.focused {
                    MoneyField::Amount => form.amount.pop(),
                    MoneyField::Phone => form.phone.pop(),
                    MoneyField::Network => None,
                };
            }
            KeyCode::Enter => self.submit_money_form(),
            _ => {}
        }
    }

    fn handle_recharge_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if is_ussd_char(c) => self.shell.recharge_code.push(c),
            KeyCode::Backspace => {
                self.shell.recharge_code.pop();
            }
            KeyCode::Enter => self.submit_recharge(),
            _ => {}
        }
    }
}
