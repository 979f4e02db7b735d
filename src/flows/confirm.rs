use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::OperationRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Deposit,
    Withdrawal,
}

impl OperationType {
    pub fn label(self) -> &'static str {
        match self {
            OperationType::Deposit => "Deposit",
            OperationType::Withdrawal => "Withdrawal",
        }
    }
}

/// Mobile-money operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: u32,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationState {
    pub operation_type: OperationType,
    pub amount: String,
    pub recipient_phone: String,
    pub network: Option<Network>,
    pub is_processing: bool,
}

/// Explicit confirmation in front of a money-moving request.
///
/// While a request is outstanding both actions are disabled, so the same
/// operation can not be submitted twice. The caller performs the request
/// and calls [`ConfirmationFlow::finish`] when it resolves, successful or
/// not.
#[derive(Debug)]
pub struct ConfirmationFlow {
    state: ConfirmationState,
}

impl ConfirmationFlow {
    pub fn new(
        operation_type: OperationType,
        amount: impl Into<String>,
        recipient_phone: impl Into<String>,
        network: Option<Network>,
    ) -> Self {
        Self {
            state: ConfirmationState {
                operation_type,
                amount: amount.into(),
                recipient_phone: recipient_phone.into(),
                network,
                is_processing: false,
            },
        }
    }

    pub fn state(&self) -> &ConfirmationState {
        &self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state.is_processing
    }

    /// Whether confirm/cancel are enabled.
    pub fn actions_enabled(&self) -> bool {
        !self.state.is_processing
    }

    /// Lock the flow and hand back the request to submit. `None` while a
    /// previous confirmation is still in flight.
    pub fn confirm(&mut self) -> Option<OperationRequest> {
        if self.state.is_processing {
            debug!("confirm ignored, request already in flight");
            return None;
        }
        self.state.is_processing = true;
        info!(
            operation = self.state.operation_type.label(),
            amount = %self.state.amount,
            "operation confirmed"
        );
        Some(OperationRequest {
            operation_type: self.state.operation_type,
            amount: self.state.amount.clone(),
            phone: self.state.recipient_phone.clone(),
            network_id: self.state.network.as_ref().map(|n| n.id),
        })
    }

    /// `false` when refused because a request is in flight.
    pub fn cancel(&mut self) -> bool {
        if self.state.is_processing {
            debug!("cancel ignored, request already in flight");
            return false;
        }
        true
    }

    /// Re-enable the actions once the request resolved.
    pub fn finish(&mut self) {
        self.state.is_processing = false;
    }

    /// Label/value pairs for the confirmation dialog.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("Operation", self.state.operation_type.label().to_string()),
            ("Amount", self.state.amount.clone()),
            ("Phone", self.state.recipient_phone.clone()),
        ];
        if let Some(network) = &self.state.network {
            rows.push(("Network", network.name.clone()));
        }
        rows
    }
}
