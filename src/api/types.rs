use serde::{Deserialize, Serialize};

use crate::flows::OperationType;
use crate::session::UserProfile;

/// Partial profile for `PUT /profile`; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProfileUpdateResponse {
    pub message: String,
    pub user: UserProfile,
    #[serde(default)]
    pub changes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordUpdate {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// A confirmed deposit or withdrawal, ready to submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRequest {
    /// Selects the endpoint, not sent in the body
    #[serde(skip)]
    pub operation_type: OperationType,
    pub amount: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<u32>,
}

impl OperationRequest {
    pub fn path(&self) -> &'static str {
        match self.operation_type {
            OperationType::Deposit => "deposit",
            OperationType::Withdrawal => "withdraw",
        }
    }
}

/// Server answer to an operation. A deposit may ask the user to finish on
/// their phone (`ussd_code`) or on a payment page (`payment_url`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperationReceipt {
    pub message: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub ussd_code: Option<String>,
    #[serde(default)]
    pub payment_url: Option<String>,
}
