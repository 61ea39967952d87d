//! Error types for MiNegocio operations

use crate::envelope::ApiEnvelope;
use thiserror::Error;

/// Result alias for remote API calls.
pub type ApiResult<T> = Result<T, RemoteOperationFailure>;

/// Any failed remote call: a non-2xx response, an undecodable success body,
/// or a transport failure (no HTTP status).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", describe(.status, .status_text, .body))]
pub struct RemoteOperationFailure {
    pub status: Option<u16>,
    pub status_text: String,
    pub body: String,
}

impl RemoteOperationFailure {
    pub fn http(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self {
            status: None,
            status_text: reason.into(),
            body: String::new(),
        }
    }

    pub fn is_transport(&self) -> bool {
        self.status.is_none()
    }
}

/// `"<status> <text> - <detail>"`, where the detail is the server's envelope
/// message when present and the raw body otherwise.
fn describe(status: &Option<u16>, status_text: &str, body: &str) -> String {
    let mut text = match status {
        Some(status) => format!("{} {}", status, status_text),
        None => status_text.to_string(),
    };
    let detail = server_message(body).unwrap_or_else(|| body.trim().to_string());
    if !detail.is_empty() {
        text.push_str(" - ");
        text.push_str(&detail);
    }
    text
}

/// The `message` of an error envelope in `body`, if any.
fn server_message(body: &str) -> Option<String> {
    ApiEnvelope::parse(body)
        .and_then(|envelope| envelope.message)
        .filter(|message| !message.trim().is_empty())
}

/// Local validation failures. These block emission and never reach the API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredFieldMissing { field: &'static str },

    #[error("The primary address cannot be modified or removed")]
    PrimaryAddressImmutable,

    #[error("{entity} has no identifier yet")]
    MissingIdentity { entity: &'static str },
}

impl ValidationError {
    pub fn required(field: &'static str) -> Self {
        Self::RequiredFieldMissing { field }
    }
}
