//! Application database model

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for applications table
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub telegram: String,
    pub category: String,
    pub description: String,
    pub links: Json<Vec<String>>,
    pub avatar: Option<String>,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
