use anyhow::bail;
use crossterm::event::KeyCode;

use crate::shell::{App, Modal, Shell};

impl App {
    pub fn handle_modal_key(&mut self, code: KeyCode) {
        match &self.shell.modal {
            Some(Modal::Confirm(_)) => self.handle_confirm_key(code),
            Some(Modal::Handoff(_)) => self.handle_handoff_key(code),
            None => {}
        }
    }
}

impl Shell {
    /// Back handler registered while a dialog is open.
    ///
    /// Fails, leaving the dialog up, when a confirmed request is still in
    /// flight.
    pub fn dismiss_modal(&mut self) -> anyhow::Result<()> {
        match self.modal.take() {
            Some(Modal::Confirm(mut flow)) => {
                if !flow.cancel() {
                    self.modal = Some(Modal::Confirm(flow));
                    bail!("confirmation is processing");
                }
            }
            Some(Modal::Handoff(flow)) => {
                flow.close();
            }
            None => {}
        }
        self.modal_error = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::config::WalletConfig;
    use crate::flows::{ActionHandoffFlow, ConfirmationFlow, OperationType};

    #[test]
    fn dismiss_refuses_while_processing() {
        let mut shell = Shell::new(WalletConfig::default(), Instant::now());
        let mut flow = ConfirmationFlow::new(OperationType::Deposit, "10", "0241234567", None);
        assert!(flow.confirm().is_some());
        shell.modal = Some(Modal::Confirm(flow));

        assert!(shell.dismiss_modal().is_err());
        assert!(matches!(shell.modal, Some(Modal::Confirm(_))));

        if let Some(Modal::Confirm(flow)) = &mut shell.modal {
            flow.finish();
        }
        assert!(shell.dismiss_modal().is_ok());
        assert!(shell.modal.is_none());
    }

    #[test]
    fn dismiss_closes_handoff() {
        let mut shell = Shell::new(WalletConfig::default(), Instant::now());
        shell.modal = Some(Modal::Handoff(ActionHandoffFlow::dial("*170#").unwrap()));
        shell.modal_error = Some("stale".to_string());

        assert!(shell.dismiss_modal().is_ok());
        assert!(shell.modal.is_none());
        assert!(shell.modal_error.is_none());
    }
}
