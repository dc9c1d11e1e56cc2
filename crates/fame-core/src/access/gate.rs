use std::fmt;

use crate::error::DomainError;
use crate::value_objects::{Identity, RoleSet};

/// Privileged operations and the access table that governs them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SubmitApplication,
    ListOwnApplications,
    ListApplications,
    ViewApplication,
    DecideApplication,
    ListMembers,
    NextMemberId,
    CreateMember,
    UpdateMember,
    UploadAvatar,
    DeleteMember,
    ViewStats,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Self::SubmitApplication,
        Self::ListOwnApplications,
        Self::ListApplications,
        Self::ViewApplication,
        Self::DecideApplication,
        Self::ListMembers,
        Self::NextMemberId,
        Self::CreateMember,
        Self::UpdateMember,
        Self::UploadAvatar,
        Self::DeleteMember,
        Self::ViewStats,
    ];

    /// Roles admitted by this operation
    pub const fn required_roles(self) -> RoleSet {
        match self {
            Self::SubmitApplication | Self::ListOwnApplications => RoleSet::ANY,

            Self::ListApplications
            | Self::ViewApplication
            | Self::DecideApplication
            | Self::ListMembers
            | Self::NextMemberId
            | Self::CreateMember
            | Self::UpdateMember
            | Self::UploadAvatar
            | Self::ViewStats => RoleSet::STAFF,

            // moderators may edit but not delete
            Self::DeleteMember => RoleSet::ADMIN,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::SubmitApplication => "submit_application",
            Self::ListOwnApplications => "list_own_applications",
            Self::ListApplications => "list_applications",
            Self::ViewApplication => "view_application",
            Self::DecideApplication => "decide_application",
            Self::ListMembers => "list_members",
            Self::NextMemberId => "next_member_id",
            Self::CreateMember => "create_member",
            Self::UpdateMember => "update_member",
            Self::UploadAvatar => "upload_avatar",
            Self::DeleteMember => "delete_member",
            Self::ViewStats => "view_stats",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Allow the identity if its role is in `required`
pub fn authorize(identity: &Identity, required: RoleSet) -> Result<(), DomainError> {
    if identity.has_any(required) {
        Ok(())
    } else {
        Err(DomainError::Forbidden {
            role: identity.role,
        })
    }
}

/// Allow the identity if the access table admits its role for `operation`
pub fn authorize_operation(identity: &Identity, operation: Operation) -> Result<(), DomainError> {
    authorize(identity, operation.required_roles())
}
