//! Domain events - emitted after a state change commits
//!
//! These events are used for:
//! - Notifying administrators about new applications
//! - Notifying applicants about decisions
//! - Audit logging

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Application, Member};
use crate::value_objects::{ApplicationStatus, Category};

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // User Events
    // =========================================================================
    UserRegistered(UserRegisteredEvent),

    // =========================================================================
    // Application Events
    // =========================================================================
    ApplicationSubmitted(ApplicationSubmittedEvent),
    ApplicationDecided(ApplicationDecidedEvent),

    // =========================================================================
    // Member Events
    // =========================================================================
    MemberCreated(MemberCreatedEvent),
    MemberUpdated(MemberUpdatedEvent),
    MemberDeleted(MemberDeletedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::UserRegistered(_) => "USER_REGISTERED",
            Self::ApplicationSubmitted(_) => "APPLICATION_SUBMITTED",
            Self::ApplicationDecided(_) => "APPLICATION_DECIDED",
            Self::MemberCreated(_) => "MEMBER_CREATED",
            Self::MemberUpdated(_) => "MEMBER_UPDATED",
            Self::MemberDeleted(_) => "MEMBER_DELETED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::UserRegistered(e) => e.timestamp,
            Self::ApplicationSubmitted(e) => e.timestamp,
            Self::ApplicationDecided(e) => e.timestamp,
            Self::MemberCreated(e) => e.timestamp,
            Self::MemberUpdated(e) => e.timestamp,
            Self::MemberDeleted(e) => e.timestamp,
        }
    }

    pub fn application_submitted(application: &Application) -> Self {
        Self::ApplicationSubmitted(ApplicationSubmittedEvent::new(application))
    }

    pub fn application_decided(application: &Application, member_id: Option<i64>) -> Self {
        Self::ApplicationDecided(ApplicationDecidedEvent::new(application, member_id))
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRegisteredEvent {
    pub user_id: i64,
    pub username: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSubmittedEvent {
    pub application_id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub category: Category,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationDecidedEvent {
    pub application_id: i64,
    pub user_id: i64,
    pub status: ApplicationStatus,
    pub processed_by: Option<i64>,
    pub rejection_reason: Option<String>,
    /// Member materialized by an approval
    pub member_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberCreatedEvent {
    pub member_id: i64,
    pub application_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberUpdatedEvent {
    pub member_id: i64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDeletedEvent {
    pub member_id: i64,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Event Creation Helpers
// ============================================================================

impl UserRegisteredEvent {
    pub fn new(user_id: i64, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            timestamp: Utc::now(),
        }
    }
}

impl ApplicationSubmittedEvent {
    pub fn new(application: &Application) -> Self {
        Self {
            application_id: application.id,
            user_id: application.user_id,
            nickname: application.nickname.clone(),
            category: application.category,
            timestamp: Utc::now(),
        }
    }
}

impl ApplicationDecidedEvent {
    pub fn new(application: &Application, member_id: Option<i64>) -> Self {
        Self {
            application_id: application.id,
            user_id: application.user_id,
            status: application.status,
            processed_by: application.processed_by,
            rejection_reason: application.rejection_reason.clone(),
            member_id,
            timestamp: Utc::now(),
        }
    }
}

impl MemberCreatedEvent {
    pub fn new(member: &Member) -> Self {
        Self {
            member_id: member.id,
            application_id: member.application_id,
            timestamp: Utc::now(),
        }
    }
}

impl MemberUpdatedEvent {
    pub fn new(member_id: i64) -> Self {
        Self {
            member_id,
            timestamp: Utc::now(),
        }
    }
}

impl MemberDeletedEvent {
    pub fn new(member_id: i64) -> Self {
        Self {
            member_id,
            timestamp: Utc::now(),
        }
    }
}
