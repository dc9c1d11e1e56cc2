//! Member entity - a published fame list entry

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::Category;

/// Published directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub nickname: String,
    /// Display username, usually `@handle`
    pub username: String,
    pub category: Category,
    /// Display role label
    pub role: Option<String>,
    pub telegram: Option<String>,
    pub description: String,
    pub project: Option<String>,
    pub join_date: NaiveDate,
    /// Stored avatar reference (`img/avatar<id>.<ext>`)
    pub avatar: Option<String>,
    pub verified: bool,
    pub pinned: bool,
    pub scam: bool,
    pub activity: Option<String>,
    pub details: Option<String>,
    pub skills: Vec<String>,
    /// Application this member was materialized from, if any
    pub application_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Merge the present fields of a patch
    pub fn apply(&mut self, patch: MemberPatch) {
        if let Some(nickname) = patch.nickname {
            self.nickname = nickname;
        }
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(telegram) = patch.telegram {
            self.telegram = telegram;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(project) = patch.project {
            self.project = project;
        }
        if let Some(join_date) = patch.join_date {
            self.join_date = join_date;
        }
        if let Some(avatar) = patch.avatar {
            self.avatar = avatar;
        }
        if let Some(verified) = patch.verified {
            self.verified = verified;
        }
        if let Some(pinned) = patch.pinned {
            self.pinned = pinned;
        }
        if let Some(scam) = patch.scam {
            self.scam = scam;
        }
        if let Some(activity) = patch.activity {
            self.activity = activity;
        }
        if let Some(details) = patch.details {
            self.details = details;
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields required to create a member; the id is assigned by storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
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
}

/// Partial update; `None` leaves a field alone, `Some(None)` clears an optional one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberPatch {
    pub nickname: Option<String>,
    pub username: Option<String>,
    pub category: Option<Category>,
    pub role: Option<Option<String>>,
    pub telegram: Option<Option<String>>,
    pub description: Option<String>,
    pub project: Option<Option<String>>,
    pub join_date: Option<NaiveDate>,
    pub avatar: Option<Option<String>>,
    pub verified: Option<bool>,
    pub pinned: Option<bool>,
    pub scam: Option<bool>,
    pub activity: Option<Option<String>>,
    pub details: Option<Option<String>>,
    pub skills: Option<Vec<String>>,
}

/// Filter for the public fame list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    pub category: Option<Category>,
    /// Case-insensitive substring of the nickname, username, or contact handle
    pub search: Option<String>,
}

/// Aggregate counts over the member directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberStats {
    pub total: i64,
    pub scam: i64,
    pub verified: i64,
    pub by_category: Vec<(Category, i64)>,
}
