//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Enumerated values (category, status) arrive as strings and are parsed by the
//! services so that an unknown value yields a precise message.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

/// Upper bound on supporting links per application
pub const MAX_LINKS: usize = 20;

/// Upper bound on a single link
pub const MAX_LINK_LEN: usize = 500;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 128, message = "Password must be 6-128 characters"))]
    pub password: String,

    #[validate(length(max = 50, message = "Telegram must be at most 50 characters"))]
    pub telegram: Option<String>,
}

/// Login request; `username` may also hold an email address
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    pub remember: bool,
}

// ============================================================================
// Application Requests
// ============================================================================

/// Application submission
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitApplicationRequest {
    #[validate(length(min = 1, max = 100, message = "Nickname must be 1-100 characters"))]
    pub nickname: String,

    #[validate(length(min = 1, max = 50, message = "Telegram must be 1-50 characters"))]
    pub telegram: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "validate_links"))]
    pub links: Vec<String>,

    /// Base64 data URI (`data:image/png;base64,...`)
    pub avatar: Option<String>,
}

fn validate_links(links: &[String]) -> Result<(), ValidationError> {
    if links.len() > MAX_LINKS {
        return Err(ValidationError::new("links_count")
            .with_message(format!("At most {MAX_LINKS} links are allowed").into()));
    }
    if links.iter().any(|link| link.len() > MAX_LINK_LEN) {
        return Err(ValidationError::new("link_length")
            .with_message(format!("Links must be at most {MAX_LINK_LEN} characters").into()));
    }
    Ok(())
}

/// Approve or reject a pending application
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,

    #[validate(length(max = 1000, message = "Rejection reason must be at most 1000 characters"))]
    pub rejection_reason: Option<String>,
}

/// Filters of the administrative application listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationListQuery {
    /// Status filter; `all` or empty means any
    pub status: Option<String>,
    /// Category filter; `all` or empty means any
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Filters of the public fame list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Page selection, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 20;
    pub const MAX_LIMIT: u32 = 100;

    /// Defaults to page 1 of 20; the limit is clamped to `1..=100`
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .clamp(1, Self::MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.limit)
    }

    pub fn total_pages(&self, total: i64) -> i64 {
        let limit = i64::from(self.limit);
        (total + limit - 1) / limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

// ============================================================================
// Member Requests
// ============================================================================

/// Create a member directly
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Nickname must be 1-100 characters"))]
    pub nickname: String,

    /// Display username; derived from the contact handle when absent
    #[validate(length(max = 100, message = "Username must be at most 100 characters"))]
    pub username: Option<String>,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    pub role: Option<String>,

    #[validate(length(max = 50, message = "Telegram must be at most 50 characters"))]
    pub telegram: Option<String>,

    pub description: Option<String>,
    pub project: Option<String>,
    /// Defaults to today
    pub join_date: Option<NaiveDate>,
    /// Reference returned by the avatar upload
    pub avatar: Option<String>,

    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub scam: bool,

    pub activity: Option<String>,
    pub details: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Partial member update; absent fields stay, an empty string clears an optional text
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "Nickname must be 1-100 characters"))]
    pub nickname: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: Option<String>,

    pub category: Option<String>,
    pub role: Option<String>,

    #[validate(length(max = 50, message = "Telegram must be at most 50 characters"))]
    pub telegram: Option<String>,

    pub description: Option<String>,
    pub project: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub avatar: Option<String>,
    pub verified: Option<bool>,
    pub pinned: Option<bool>,
    pub scam: Option<bool>,
    pub activity: Option<String>,
    pub details: Option<String>,
    pub skills: Option<Vec<String>>,
}

/// An uploaded avatar file, as extracted from a multipart form
#[derive(Debug, Clone)]
pub struct UploadAvatar {
    /// Raw `memberId` form field
    pub member_id: Option<String>,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
