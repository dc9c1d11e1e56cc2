//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output with camelCase keys.
//! Every top-level body carries `success: true`; failures are rendered by the HTTP layer.

use chrono::{DateTime, NaiveDate, Utc};
use fame_core::{ApplicationStatus, Category, Role};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Public view of an account
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub telegram: Option<String>,
    pub role: Role,
}

/// Register / login result
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, token: String, user: UserResponse) -> Self {
        Self {
            success: true,
            message: message.into(),
            token,
            user,
        }
    }
}

/// Token verification result
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub success: bool,
    pub user: UserResponse,
}

// ============================================================================
// Application Responses
// ============================================================================

/// Applicant details embedded in administrative views
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub telegram: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub telegram: String,
    pub category: Category,
    pub description: String,
    pub links: Vec<String>,
    pub avatar: Option<String>,
    pub status: ApplicationStatus,
    pub rejection_reason: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ApplicantResponse>,
}

/// A single application, optionally with the member it produced
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub application: ApplicationResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberResponse>,
}

impl ApplicationEnvelope {
    pub fn new(application: ApplicationResponse) -> Self {
        Self {
            success: true,
            message: None,
            application,
            member: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_member(mut self, member: MemberResponse) -> Self {
        self.member = Some(member);
        self
    }
}

/// The caller's own applications
#[derive(Debug, Clone, Serialize)]
pub struct MyApplicationsResponse {
    pub success: bool,
    pub applications: Vec<ApplicationResponse>,
}

/// A page of the administrative listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListResponse {
    pub success: bool,
    pub applications: Vec<ApplicationResponse>,
    pub total: i64,
    pub page: u32,
    pub total_pages: i64,
}

// ============================================================================
// Member Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub nickname: String,
    pub username: String,
    pub category: Category,
    pub role: Option<String>,
    pub telegram: Option<String>,
    pub description: String,
    pub project: Option<String>,
    pub join_date: NaiveDate,
    pub avatar: Option<String>,
    pub verified: bool,
    pub pinned: bool,
    pub scam: bool,
    pub activity: Option<String>,
    pub details: Option<String>,
    pub skills: Vec<String>,
    pub application_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub member: MemberResponse,
}

impl MemberEnvelope {
    pub fn new(member: MemberResponse) -> Self {
        Self {
            success: true,
            message: None,
            member,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberListResponse {
    pub success: bool,
    pub members: Vec<MemberResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextIdResponse {
    pub success: bool,
    pub next_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadAvatarResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    /// URL path under which the file is served
    pub path: String,
}

// ============================================================================
// Stats Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCountResponse {
    pub category: Category,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBody {
    pub total_members: i64,
    pub total_applications: i64,
    pub pending_applications: i64,
    pub total_users: i64,
    pub scam_members: i64,
    pub verified_members: i64,
    pub members_by_category: Vec<CategoryCountResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StatsBody,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn from_database(database_ok: bool) -> Self {
        let status = |ok: bool| if ok { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if database_ok { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: status(database_ok),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
