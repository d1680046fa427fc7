//! Error taxonomy shared by every zome.
//!
//! The `Display` form starts with the kind in brackets so that a gateway in
//! front of the conductor can map a guest error back to a status code
//! without parsing free text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a failure, one per HTTP status family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Authorization,
    NotFound,
    Conflict,
    InvalidState,
    Unexpected,
}

impl ErrorKind {
    /// Status code used by the JSON envelope.
    ///
    /// Conflicts and state errors share 400 with validation failures.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Authentication => 401,
            ErrorKind::Authorization => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 400,
            ErrorKind::InvalidState => 400,
            ErrorKind::Unexpected => 500,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation",
            ErrorKind::Authentication => "Authentication",
            ErrorKind::Authorization => "Authorization",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::InvalidState => "InvalidState",
            ErrorKind::Unexpected => "Unexpected",
        }
    }

    /// Recover the kind from a rendered error message.
    pub fn from_message(message: &str) -> Option<ErrorKind> {
        let start = message.find('[')?;
        let end = message[start..].find(']')? + start;
        match &message[start + 1..end] {
            "Validation" => Some(ErrorKind::Validation),
            "Authentication" => Some(ErrorKind::Authentication),
            "Authorization" => Some(ErrorKind::Authorization),
            "NotFound" => Some(ErrorKind::NotFound),
            "Conflict" => Some(ErrorKind::Conflict),
            "InvalidState" => Some(ErrorKind::InvalidState),
            "Unexpected" => Some(ErrorKind::Unexpected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CareError {
    #[error("[Validation] {field}: {message}")]
    Validation { field: String, message: String },
    #[error("[Authentication] {0}")]
    Authentication(String),
    #[error("[Authorization] {0}")]
    Authorization(String),
    #[error("[NotFound] {0}")]
    NotFound(String),
    #[error("[Conflict] {0}")]
    Conflict(String),
    #[error("[InvalidState] {0}")]
    InvalidState(String),
    #[error("[Unexpected] {0}")]
    Unexpected(String),
}

pub type CareResult<T> = Result<T, CareError>;

impl CareError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        CareError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CareError::Validation { .. } => ErrorKind::Validation,
            CareError::Authentication(_) => ErrorKind::Authentication,
            CareError::Authorization(_) => ErrorKind::Authorization,
            CareError::NotFound(_) => ErrorKind::NotFound,
            CareError::Conflict(_) => ErrorKind::Conflict,
            CareError::InvalidState(_) => ErrorKind::InvalidState,
            CareError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Message safe to hand to a client.
    ///
    /// Unexpected failures keep their detail only in development mode.
    pub fn public_message(&self, development_mode: bool) -> String {
        match self {
            CareError::Unexpected(_) if !development_mode => {
                "[Unexpected] Internal error".to_string()
            }
            other => other.to_string(),
        }
    }
}
