//! Member database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub nickname: String,
    pub username: String,
    pub category: String,
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
    pub skills: Json<Vec<String>>,
    pub application_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flag totals over the members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberTotalsModel {
    pub total: i64,
    pub scam: i64,
    pub verified: i64,
}

/// Member count for one category
#[derive(Debug, Clone, FromRow)]
pub struct CategoryCountModel {
    pub category: String,
    pub count: i64,
}
