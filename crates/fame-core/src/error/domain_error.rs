//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{ApplicationStatus, Role};

/// Domain layer errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Application not found: {0}")]
    ApplicationNotFound(i64),

    #[error("Member not found: {0}")]
    MemberNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Unknown status: {0}")]
    InvalidStatus(String),

    #[error("Only image files are allowed (jpeg, jpg, png, gif, webp)")]
    UnsupportedImage,

    #[error("File too large: max {max_mb} MB")]
    FileTooLarge { max_mb: u64 },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Access denied for role '{role}'")]
    Forbidden { role: Role },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("You already have an application under review")]
    ActiveApplicationExists,

    // =========================================================================
    // State Errors
    // =========================================================================
    #[error("Application {id} has already been processed ({status})")]
    ApplicationAlreadyProcessed { id: i64, status: ApplicationStatus },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ApplicationNotFound(_) => "UNKNOWN_APPLICATION",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidCategory(_) => "INVALID_CATEGORY",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::UnsupportedImage => "UNSUPPORTED_IMAGE",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",

            // Authorization
            Self::Forbidden { .. } => "FORBIDDEN",

            // Conflict
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::ActiveApplicationExists => "ACTIVE_APPLICATION_EXISTS",

            // State
            Self::ApplicationAlreadyProcessed { .. } => "ALREADY_PROCESSED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::ApplicationNotFound(_) | Self::MemberNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::InvalidCategory(_)
                | Self::InvalidStatus(_)
                | Self::UnsupportedImage
                | Self::FileTooLarge { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameTaken | Self::EmailAlreadyExists | Self::ActiveApplicationExists
        )
    }

    /// Check if this is an illegal state transition
    pub fn is_state(&self) -> bool {
        matches!(self, Self::ApplicationAlreadyProcessed { .. })
    }

    /// Check if this wraps an infrastructure failure
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::DatabaseError(_) | Self::StorageError(_) | Self::InternalError(_)
        )
    }
}
