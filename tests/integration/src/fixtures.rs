//! Test fixtures and data generators
//!
//! Request bodies and the response shapes the tests read back.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// A suffix unique across test runs against the same database
///
/// The trailing `x` keeps one suffix from being a substring of another in search tests.
pub fn unique_suffix() -> String {
    format!(
        "{}{}x",
        chrono::Utc::now().timestamp_millis(),
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

/// A 1x1 PNG
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub telegram: Option<String>,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user{suffix}"),
            email: format!("user{suffix}@example.com"),
            password: "secret1".to_string(),
            telegram: Some(format!("@tg{suffix}")),
        }
    }
}

/// Login request; `username` may hold an email
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub remember: bool,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username: reg.username.clone(),
            password: reg.password.clone(),
            remember: false,
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub user: UserBody,
}

/// User as returned by auth endpoints
#[derive(Debug, Deserialize)]
pub struct UserBody {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub telegram: Option<String>,
    pub role: String,
}

/// Body of `GET /api/auth/verify`
#[derive(Debug, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub user: UserBody,
}

/// Uniform failure body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub code: String,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

/// Application submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmitApplicationRequest {
    pub nickname: String,
    pub telegram: String,
    pub category: String,
    pub description: String,
    pub links: Vec<String>,
    pub avatar: Option<String>,
}

impl SubmitApplicationRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            nickname: format!("Nick{suffix}"),
            telegram: format!("@handle{suffix}"),
            category: "Coder".to_string(),
            description: "Writes the tools everyone uses".to_string(),
            links: vec!["https://example.com/portfolio".to_string()],
            avatar: None,
        }
    }
}

/// Application as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationBody {
    pub id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub telegram: String,
    pub category: String,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationEnvelope {
    pub success: bool,
    pub application: ApplicationBody,
    #[serde(default)]
    pub member: Option<MemberBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListBody {
    pub success: bool,
    pub applications: Vec<ApplicationBody>,
    pub total: i64,
    pub page: u32,
    pub total_pages: i64,
}

/// Member as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBody {
    pub id: i64,
    pub nickname: String,
    pub username: String,
    pub category: String,
    pub telegram: Option<String>,
    pub avatar: Option<String>,
    pub verified: bool,
    pub pinned: bool,
    pub scam: bool,
}

#[derive(Debug, Deserialize)]
pub struct MemberEnvelope {
    pub success: bool,
    pub member: MemberBody,
}

#[derive(Debug, Deserialize)]
pub struct MemberListBody {
    pub success: bool,
    pub members: Vec<MemberBody>,
}
