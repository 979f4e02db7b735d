use std::time::Instant;

use crossterm::event::KeyCode;

use crate::flows::ActionHandoffFlow;
use crate::nav::ScreenId;
use crate::shell::{App, Modal};

impl App {
    /// Show the handoff dialog and fire its automatic attempt.
    pub fn open_handoff(&mut self, mut flow: ActionHandoffFlow) {
        self.shell.menu.open = false;
        flow.open(self.platform.as_mut(), &mut self.shell.notices);
        self.shell.modal = Some(Modal::Handoff(flow));
    }

    pub fn submit_recharge(&mut self) {
        match ActionHandoffFlow::dial(self.shell.recharge_code.as_str()) {
            Ok(flow) => {
                self.shell.status_message = None;
                self.open_handoff(flow);
            }
            Err(e) => self.shell.status_message = Some(e.to_string()),
        }
    }

    pub fn handle_handoff_key(&mut self, code: KeyCode) {
        let Some(Modal::Handoff(flow)) = &mut self.shell.modal else {
            return;
        };

        match code {
            KeyCode::Char('r') => {
                flow.retry(self.platform.as_mut(), &mut self.shell.notices);
            }
            KeyCode::Char('c') => {
                flow.copy(self.platform.as_mut(), &mut self.shell.notices, Instant::now());
            }
            KeyCode::Enter => {
                if let Some(Modal::Handoff(flow)) = self.shell.modal.take() {
                    flow.proceed();
                    self.resume_after_handoff();
                }
            }
            _ => {}
        }
    }

    /// Back from the dialer or the payment page.
    fn resume_after_handoff(&mut self) {
        self.shell.modal_error = None;
        self.shell.recharge_code.clear();
        self.spawn_profile_fetch();
        self.shell.nav.reset_to(ScreenId::Dashboard);
        self.shell
            .notices
            .info("Welcome back. Your balance updates once the operation completes.");
    }
}
