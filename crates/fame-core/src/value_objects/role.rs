//! Access roles and role sets
//!
//! A `Role` is the access level stored on a user. A `RoleSet` is the set of roles an
//! operation admits; the access table in `crate::access` is written in terms of it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseValueError;

/// Access level of an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Moderator,
    Admin,
}

impl Role {
    /// Storage and wire representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Moderator => "moderator",
            Self::Admin => "admin",
        }
    }

    /// The single-member set for this role
    pub const fn as_set(self) -> RoleSet {
        match self {
            Self::User => RoleSet::USER,
            Self::Moderator => RoleSet::MODERATOR,
            Self::Admin => RoleSet::ADMIN,
        }
    }

    /// Moderators and administrators
    #[inline]
    pub fn is_staff(self) -> bool {
        RoleSet::STAFF.permits(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseValueError::new("role", s)),
        }
    }
}

bitflags! {
    /// Set of roles admitted by an operation
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RoleSet: u8 {
        const USER      = 1 << 0;
        const MODERATOR = 1 << 1;
        const ADMIN     = 1 << 2;

        /// Moderators and administrators
        const STAFF = Self::MODERATOR.bits() | Self::ADMIN.bits();

        /// Any authenticated identity
        const ANY = Self::USER.bits() | Self::STAFF.bits();
    }
}

impl RoleSet {
    /// Check whether the set admits a role
    #[inline]
    pub fn permits(self, role: Role) -> bool {
        self.contains(role.as_set())
    }

    /// Roles in the set, lowest access level first
    pub fn roles(self) -> Vec<Role> {
        [Role::User, Role::Moderator, Role::Admin]
            .into_iter()
            .filter(|role| self.permits(*role))
            .collect()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.roles().into_iter().map(Role::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
