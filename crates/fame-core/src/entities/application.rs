//! Application entity - a user's request to join the fame list

use chrono::{DateTime, NaiveDate, Utc};

use super::member::NewMember;
use crate::error::DomainError;
use crate::value_objects::{ApplicationStatus, Category};

/// Join request owned by a user
///
/// Invariants (also enforced by storage constraints):
/// - `processed_at` and `processed_by` are set iff `status` is terminal
/// - `rejection_reason` is set iff `status` is `Rejected`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub telegram: String,
    pub category: Category,
    pub description: String,
    pub links: Vec<String>,
    /// Stored avatar reference (`img/...`)
    pub avatar: Option<String>,
    pub status: ApplicationStatus,
    pub rejection_reason: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Administrative decision on a pending application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject { reason: String },
}

impl Decision {
    pub fn target_status(&self) -> ApplicationStatus {
        match self {
            Self::Approve => ApplicationStatus::Approved,
            Self::Reject { .. } => ApplicationStatus::Rejected,
        }
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Approve => None,
            Self::Reject { reason } => Some(reason),
        }
    }
}

impl Application {
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    /// Fail with a state error unless the application is still pending
    pub fn ensure_pending(&self) -> Result<(), DomainError> {
        if self.is_pending() {
            Ok(())
        } else {
            Err(DomainError::ApplicationAlreadyProcessed {
                id: self.id,
                status: self.status,
            })
        }
    }

    /// Apply a decision in place
    ///
    /// Leaves the application untouched when the transition is illegal.
    pub fn decide(
        &mut self,
        decision: &Decision,
        admin_id: i64,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let next = decision.target_status();
        if !self.status.can_transition_to(next) {
            return Err(DomainError::ApplicationAlreadyProcessed {
                id: self.id,
                status: self.status,
            });
        }

        self.status = next;
        self.rejection_reason = decision.rejection_reason().map(str::to_string);
        self.processed_at = Some(at);
        self.processed_by = Some(admin_id);
        self.updated_at = at;
        Ok(())
    }

    /// Member record materialized when this application is approved
    ///
    /// The avatar is attached separately once the member id is known.
    pub fn member_seed(&self, join_date: NaiveDate) -> NewMember {
        let handle = self.telegram.trim_start_matches('@');
        NewMember {
            nickname: self.nickname.clone(),
            username: format!("@{handle}"),
            category: self.category,
            role: Some(self.category.label().to_string()),
            telegram: Some(handle.to_string()),
            description: self.description.clone(),
            project: Some(format!("https://t.me/{handle}")),
            join_date,
            avatar: None,
            verified: false,
            pinned: false,
            scam: false,
            activity: None,
            details: Some(self.description.clone()),
            skills: Vec::new(),
            application_id: Some(self.id),
        }
    }
}

/// Fields required to submit an application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub user_id: i64,
    pub nickname: String,
    pub telegram: String,
    pub category: Category,
    pub description: String,
    pub links: Vec<String>,
    pub avatar: Option<String>,
}

/// Filter for the administrative application listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub category: Option<Category>,
    /// Case-insensitive substring of the nickname or the contact handle
    pub search: Option<String>,
}

impl ApplicationFilter {
    pub fn with_status(status: ApplicationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
