//! Authenticated principal

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Role, RoleSet};

/// The caller an operation runs on behalf of
///
/// Always resolved from the persisted user record, so a role change takes effect
/// on the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(id: i64, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }

    /// Check whether this identity's role is in `roles`
    #[inline]
    pub fn has_any(&self, roles: RoleSet) -> bool {
        roles.permits(self.role)
    }
}

/// Why a login attempt failed
///
/// Kept for logs only; both reasons produce the same public error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    UnknownIdentity,
    BadPassword,
}

impl fmt::Display for CredentialFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIdentity => f.write_str("unknown identity"),
            Self::BadPassword => f.write_str("bad credential"),
        }
    }
}
