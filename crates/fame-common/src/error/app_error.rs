//! Application error types
//!
//! Unified error handling for the entire application. Every variant maps onto one of
//! the HTTP statuses the API exposes: 400, 401, 403, 404 or 500.

use fame_core::{CredentialFailure, DomainError};
use serde::Serialize;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Authentication errors
    /// The reason is for logs only; it never reaches the response
    #[error("Invalid username/email or password")]
    InvalidCredentials(CredentialFailure),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    // Validation errors
    #[error("{0}")]
    Validation(String),

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(String),

    // File storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            // conflicts share 400 with validation failures
            Self::Validation(_) | Self::Conflict(_) => 400,
            Self::InvalidCredentials(_) | Self::InvalidToken | Self::TokenExpired => 401,
            Self::NotFound(_) => 404,
            Self::Database(_) | Self::Storage(_) | Self::Internal(_) | Self::Config(_) => 500,
            Self::Domain(e) => domain_status(e),
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Message safe to show to a client
    ///
    /// Server errors are reduced to a generic text; the detail belongs in logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }

    #[must_use]
    pub fn not_found(resource: impl fmt::Display) -> Self {
        Self::NotFound(resource.to_string())
    }
}

/// HTTP status for a domain error
fn domain_status(e: &DomainError) -> u16 {
    if e.is_not_found() {
        404
    } else if e.is_authorization() {
        403
    } else if e.is_validation() || e.is_conflict() || e.is_state() {
        400
    } else {
        500
    }
}

/// Error response structure for API responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: String,
    /// Per-field messages for request validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            code: code.into(),
            errors: None,
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: serde_json::Value) -> Self {
        self.errors = Some(errors);
        self
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self::new(err.error_code(), err.public_message())
    }
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fame_core::{ApplicationStatus, Role};

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidCredentials(CredentialFailure::UnknownIdentity).status_code(),
            401
        );
        assert_eq!(AppError::InvalidToken.status_code(), 401);
        assert_eq!(AppError::NotFound("user".to_string()).status_code(), 404);
        assert_eq!(AppError::Validation("test".to_string()).status_code(), 400);
        assert_eq!(AppError::Conflict("dup".to_string()).status_code(), 400);
        assert_eq!(AppError::Database("test".to_string()).status_code(), 500);
    }

    #[test]
    fn test_domain_status_codes() {
        let state = DomainError::ApplicationAlreadyProcessed {
            id: 1,
            status: ApplicationStatus::Approved,
        };
        assert_eq!(AppError::from(state).status_code(), 400);
        assert_eq!(AppError::from(DomainError::ActiveApplicationExists).status_code(), 400);
        assert_eq!(AppError::from(DomainError::Forbidden { role: Role::User }).status_code(), 403);
        assert_eq!(AppError::from(DomainError::MemberNotFound(1)).status_code(), 404);
        assert_eq!(
            AppError::from(DomainError::StorageError("disk".to_string())).status_code(),
            500
        );
    }

    #[test]
    fn test_credential_reasons_share_public_shape() {
        let unknown = AppError::InvalidCredentials(CredentialFailure::UnknownIdentity);
        let bad = AppError::InvalidCredentials(CredentialFailure::BadPassword);

        assert_eq!(unknown.to_string(), bad.to_string());
        assert_eq!(unknown.error_code(), bad.error_code());
    }

    #[test]
    fn test_server_errors_are_not_leaked() {
        let err = AppError::Database("relation \"users\" does not exist".to_string());
        let response = ErrorResponse::from(&err);

        assert!(!response.success);
        assert_eq!(response.code, "DATABASE_ERROR");
        assert_eq!(response.message, "Internal server error");
    }

    #[test]
    fn test_error_response_serialization() {
        let err = AppError::Validation("Nickname is required".to_string());
        let json = serde_json::to_value(ErrorResponse::from(&err)).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Nickname is required");
        assert!(json.get("errors").is_none());
    }
}
