// src/error/types.rs
use crate::domain::{DomainError, FieldErrors};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Field errors, if this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::Config(format!("Invalid config file: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// The REST call a transport error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiOperation {
    ListBooks,
    GetBook,
    CreateBook,
    UpdateBook,
    DeleteBook,
    HealthCheck,
}

impl ApiOperation {
    /// Message shown when the server gives no better one
    pub fn fallback_message(&self) -> &'static str {
        match self {
            ApiOperation::ListBooks => "Failed to fetch books",
            ApiOperation::GetBook => "Failed to fetch book",
            ApiOperation::CreateBook => "Failed to create book",
            ApiOperation::UpdateBook => "Failed to update book",
            ApiOperation::DeleteBook => "Failed to delete book",
            ApiOperation::HealthCheck => "Health check failed",
        }
    }
}

/// Any failure of a call to the library API
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("{}: request timed out after {:?}", .operation.fallback_message(), .after)]
    Timeout {
        operation: ApiOperation,
        after: Duration,
    },

    #[error("{}", .operation.fallback_message())]
    Network {
        operation: ApiOperation,
        details: String,
    },

    /// Non-2xx status or `success: false` envelope
    #[error("{message}")]
    Rejected {
        operation: ApiOperation,
        status: u16,
        message: String,
    },

    #[error("{message}")]
    NotFound {
        operation: ApiOperation,
        message: String,
    },

    #[error("{}: malformed server response", .operation.fallback_message())]
    Malformed {
        operation: ApiOperation,
        details: String,
    },
}

impl TransportError {
    pub fn operation(&self) -> ApiOperation {
        match self {
            TransportError::Timeout { operation, .. }
            | TransportError::Network { operation, .. }
            | TransportError::Rejected { operation, .. }
            | TransportError::NotFound { operation, .. }
            | TransportError::Malformed { operation, .. } => *operation,
        }
    }

    /// Diagnostic detail not meant for the user
    pub fn details(&self) -> Option<&str> {
        match self {
            TransportError::Network { details, .. } | TransportError::Malformed { details, .. } => {
                Some(details)
            }
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Rejected { status, .. } => Some(*status),
            TransportError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::NotFound { .. })
    }
}
