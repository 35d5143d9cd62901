// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use log::error;
use serde::Serialize;

use crate::domain::FieldErrors;
use crate::error::{ApiOperation, AppError, TransportError};

/// Standard error response for UI
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
    pub recovery: Vec<RecoveryAction>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid form input, never sent to the server
    Validation,

    /// Server unreachable, timed out or refused the request
    ExternalService,

    /// Server sent a record the client cannot hold
    DomainError,

    /// Bad configuration value
    Configuration,

    /// File system error
    FileSystem,

    /// Other/unknown error
    Internal,
}

/// What the UI may offer after a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryAction {
    /// Re-invoke the same fetch
    Retry,
    /// Clear the message only
    Dismiss,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: &AppError) -> Self {
        match error {
            AppError::Validation(fields) => Self {
                fields: Some(fields.clone()),
                ..Self::new(ErrorType::Validation, "Please correct the highlighted fields")
            },

            AppError::Transport(transport) => Self::from_transport(transport),

            AppError::Domain(domain_error) => Self {
                details: Some(domain_error.to_string()),
                ..Self::new(ErrorType::DomainError, "Invalid value")
            },

            AppError::Config(message) => Self::new(ErrorType::Configuration, message),

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);
                Self {
                    details: Some(io_error.to_string()),
                    ..Self::new(ErrorType::FileSystem, "File system operation failed")
                }
            }

            AppError::Other(message) => {
                error!("Other error: {}", message);
                Self::new(ErrorType::Internal, message)
            }
        }
    }

    pub fn from_transport(transport: &TransportError) -> Self {
        let error_type = match transport {
            TransportError::NotFound { .. } => ErrorType::NotFound,
            TransportError::Malformed { .. } => ErrorType::DomainError,
            _ => ErrorType::ExternalService,
        };

        let mut response = Self {
            details: transport.details().map(str::to_string),
            ..Self::new(error_type, transport.to_string())
        };

        // Only reads can be retried blindly
        if matches!(
            transport.operation(),
            ApiOperation::ListBooks | ApiOperation::GetBook | ApiOperation::HealthCheck
        ) {
            response.recovery.insert(0, RecoveryAction::Retry);
        }
        response
    }

    fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details: None,
            fields: None,
            recovery: vec![RecoveryAction::Dismiss],
        }
    }

    /// Create validation error
    pub fn validation(fields: FieldErrors) -> Self {
        Self::from_app_error(&AppError::Validation(fields))
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource))
    }

    /// A fetch whose failure was recorded in the store's `error` field
    pub fn fetch_failed(message: &str) -> Self {
        Self {
            recovery: vec![RecoveryAction::Retry, RecoveryAction::Dismiss],
            ..Self::new(ErrorType::ExternalService, message)
        }
    }

    pub fn can_retry(&self) -> bool {
        self.recovery.contains(&RecoveryAction::Retry)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.message.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookField;
    use std::time::Duration;

    #[test]
    fn test_transport_rejection_keeps_server_message() {
        let error = AppError::Transport(TransportError::Rejected {
            operation: ApiOperation::DeleteBook,
            status: 404,
            message: "not found".to_string(),
        });
        let response = ErrorResponse::from_app_error(&error);

        assert_eq!(response.error_type, ErrorType::ExternalService);
        assert_eq!(response.message, "not found");
        assert!(!response.can_retry());
        assert_eq!(response.recovery, vec![RecoveryAction::Dismiss]);
    }

    #[test]
    fn test_fetch_failures_offer_retry() {
        let error = AppError::Transport(TransportError::Timeout {
            operation: ApiOperation::ListBooks,
            after: Duration::from_secs(10),
        });
        let response = ErrorResponse::from_app_error(&error);

        assert!(response.can_retry());
        assert_eq!(
            response.recovery,
            vec![RecoveryAction::Retry, RecoveryAction::Dismiss]
        );
    }

    #[test]
    fn test_not_found_error() {
        let error = AppError::Transport(TransportError::NotFound {
            operation: ApiOperation::GetBook,
            message: "book not found".to_string(),
        });
        let response = ErrorResponse::from_app_error(&error);
        assert_eq!(response.error_type, ErrorType::NotFound);
        assert_eq!(response.message, "book not found");
    }

    #[test]
    fn test_validation_error_carries_fields() {
        let mut fields = FieldErrors::new();
        fields.insert(BookField::Year, "Year must be a valid number");
        let response = ErrorResponse::validation(fields);

        assert_eq!(response.error_type, ErrorType::Validation);
        let json = response.to_json();
        assert!(json.contains("\"year\": \"Year must be a valid number\""));
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::not_found("Book");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("Book not found"));
        assert!(!json.contains("fields"));
    }
}
