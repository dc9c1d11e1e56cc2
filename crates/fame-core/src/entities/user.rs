//! User entity - a registered identity

use chrono::{DateTime, Utc};

use crate::value_objects::{Identity, Role};

/// Registered user account
///
/// The password hash is not part of the entity; repositories hand it out separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub telegram: Option<String>,
    pub role: Role,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The principal this user acts as
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.username.clone(), self.role)
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    #[inline]
    pub fn is_staff(&self) -> bool {
        self.role.is_staff()
    }
}

/// Fields required to create a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub telegram: Option<String>,
    pub role: Role,
}

impl NewUser {
    /// A regular account; email is normalized to lowercase
    pub fn new(username: impl Into<String>, email: &str, telegram: Option<String>) -> Self {
        Self {
            username: username.into(),
            email: email.trim().to_lowercase(),
            telegram,
            role: Role::User,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
