use crossterm::event::KeyCode;
use tracing::{info, warn};

use crate::api::OperationReceipt;
use crate::error::ApiError;
use crate::flows::{ActionHandoffFlow, ConfirmationFlow};
use crate::shell::{poll_task, spawn_task, App, Modal, MoneyForm, TaskPoll};

use super::session::UNAUTHORIZED;

/// Minimum digits in a mobile-money number, country code excluded.
const MIN_PHONE_DIGITS: usize = 9;

fn error_summary(e: &ApiError) -> String {
    let fields = e.field_errors();
    if fields.is_empty() {
        return e.to_string();
    }
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl App {
    /// Validate the deposit/withdraw form and ask for confirmation.
    pub fn submit_money_form(&mut self) {
        let Some(operation) = self.shell.money_operation() else {
            return;
        };

        let form = &self.shell.money_form;
        let amount = form.amount.trim().to_string();
        let mut phone = form.phone.trim().to_string();
        if phone.is_empty() {
            if let Some(user) = &self.shell.session.user {
                phone = user.phone.clone();
            }
        }

        match amount.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => {}
            _ => {
                self.shell.status_message = Some("Enter an amount greater than 0".to_string());
                return;
            }
        }

        if phone.chars().filter(char::is_ascii_digit).count() < MIN_PHONE_DIGITS {
            self.shell.status_message = Some("Enter a valid mobile money number".to_string());
            return;
        }

        let network = self.shell.config.networks.get(form.network_index).cloned();
        self.shell.status_message = None;
        self.shell.modal_error = None;
        self.shell.modal = Some(Modal::Confirm(ConfirmationFlow::new(operation, amount, phone, network)));
    }

    pub fn handle_confirm_key(&mut self, code: KeyCode) {
        let Some(Modal::Confirm(flow)) = &mut self.shell.modal else {
            return;
        };

        match code {
            KeyCode::Enter | KeyCode::Char('y') => {
                let Some(request) = flow.confirm() else {
                    return;
                };
                self.shell.modal_error = None;
                let client = self.client.clone();
                self.tasks.operation = Some(spawn_task(async move { client.submit_operation(&request).await }));
            }
            KeyCode::Char('n') => {
                if flow.cancel() {
                    self.shell.modal = None;
                }
            }
            _ => {}
        }
    }

    pub fn poll_operation(&mut self) {
        let result = match poll_task(&mut self.tasks.operation) {
            TaskPoll::Pending => return,
            TaskPoll::Ready(result) => Some(result),
            TaskPoll::Lost => None,
        };

        if let Some(Modal::Confirm(flow)) = &mut self.shell.modal {
            flow.finish();
        }

        match result {
            Some(Ok(receipt)) => self.operation_accepted(receipt),
            Some(Err(e)) => {
                warn!("operation failed: {e}");
                self.shell.modal_error = Some(error_summary(&e));
                if e.status() == Some(UNAUTHORIZED) {
                    self.end_session("Your session expired. Sign in again.");
                }
            }
            None => {
                self.shell.modal_error =
                    Some("The request was interrupted. Check your history before trying again.".to_string());
            }
        }
    }

    fn operation_accepted(&mut self, receipt: OperationReceipt) {
        info!(
            reference = receipt.reference.as_deref().unwrap_or("-"),
            ussd = receipt.ussd_code.is_some(),
            redirect = receipt.payment_url.is_some(),
            "operation accepted"
        );

        self.shell.modal = None;
        self.shell.modal_error = None;
        self.shell.money_form = MoneyForm::default();
        self.shell.notices.success(receipt.message.clone());

        let handoff = match (&receipt.ussd_code, &receipt.payment_url) {
            (Some(code), _) => Some(ActionHandoffFlow::dial(code.as_str())),
            (None, Some(link)) => Some(ActionHandoffFlow::redirect(link)),
            (None, None) => None,
        };
        self.shell.last_receipt = Some(receipt);

        match handoff {
            Some(Ok(flow)) => self.open_handoff(flow),
            Some(Err(e)) => {
                warn!("unusable handoff in receipt: {e}");
                self.shell.notices.error(e.to_string());
            }
            None => self.spawn_profile_fetch(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_listed_by_field() {
        let e = ApiError::from_body(422, r#"{"message":"Invalid","errors":{"amount":["Too low"]}}"#);
        assert_eq!(error_summary(&e), "amount: Too low");

        let e = ApiError::from_body(500, r#"{"message":"Try later"}"#);
        assert_eq!(error_summary(&e), e.to_string());
    }
}
