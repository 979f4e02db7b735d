//! Error types for the wallet core and the Account API.
//!
//! Routing decisions (a screen denied by the session gate) are not errors and
//! never show up here.

use serde_json::{Map, Value};
use thiserror::Error;

/// Navigation programmer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    #[error("Unknown screen id: {0}")]
    UnknownScreen(String),

    #[error("Back signal listener is already attached")]
    ListenerAttached,
}

/// Errors constructing an action handoff
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandoffError {
    #[error("USSD code is empty")]
    EmptyCode,

    #[error("Payment link is not an absolute URL: {0}")]
    InvalidUrl(String),
}

/// Failures reported by the surrounding platform
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Failed to launch dialer: {0}")]
    Dialer(String),

    #[error("Failed to open browser: {0}")]
    Browser(String),

    #[error("Failed to access clipboard: {0}")]
    Clipboard(String),
}

/// Account API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in (no bearer token configured)")]
    MissingToken,

    /// Server-side validation failure; `errors` is the body's map, untouched.
    #[error("{message}")]
    Validation {
        status: u16,
        message: String,
        errors: Map<String, Value>,
    },

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    BaseUrl(String),
}

impl ApiError {
    /// Build the error for a non-success response body.
    pub fn from_body(status: u16, body: &str) -> Self {
        let parsed: Option<Map<String, Value>> = serde_json::from_str(body).ok();

        let Some(object) = parsed else {
            let message = if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            };
            return ApiError::Server { status, message };
        };

        let message = object
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {status}"));

        match object.get("errors") {
            Some(Value::Object(errors)) => ApiError::Validation {
                status,
                message,
                errors: errors.clone(),
            },
            _ => ApiError::Server { status, message },
        }
    }

    /// Flatten validation messages as `(field, message)` pairs.
    pub fn field_errors(&self) -> Vec<(String, String)> {
        let ApiError::Validation { errors, .. } = self else {
            return Vec::new();
        };

        let mut fields = Vec::new();
        for (field, value) in errors {
            match value {
                Value::Array(items) => {
                    for item in items {
                        let text = item
                            .as_str()
                            .map(str::to_string)
                            .unwrap_or_else(|| item.to_string());
                        fields.push((field.clone(), text));
                    }
                }
                Value::String(text) => fields.push((field.clone(), text.clone())),
                other => fields.push((field.clone(), other.to_string())),
            }
        }
        fields
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
