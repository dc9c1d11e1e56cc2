//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use fame_core::{Application, Member, MemberStats, User};

use super::responses::{
    ApplicantResponse, ApplicationResponse, CategoryCountResponse, CurrentUserResponse,
    MemberResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            telegram: user.telegram.clone(),
            role: user.role,
        }
    }
}

impl From<&User> for ApplicantResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            telegram: user.telegram.clone(),
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            success: true,
            user: UserResponse::from(user),
        }
    }
}

// ============================================================================
// Application Mappers
// ============================================================================

impl From<Application> for ApplicationResponse {
    fn from(app: Application) -> Self {
        Self {
            id: app.id,
            user_id: app.user_id,
            nickname: app.nickname,
            telegram: app.telegram,
            category: app.category,
            description: app.description,
            links: app.links,
            avatar: app.avatar,
            status: app.status,
            rejection_reason: app.rejection_reason,
            processed_at: app.processed_at,
            processed_by: app.processed_by,
            created_at: app.created_at,
            updated_at: app.updated_at,
            user: None,
        }
    }
}

impl ApplicationResponse {
    /// Embed the applicant's account details
    pub fn with_user(mut self, user: Option<&User>) -> Self {
        self.user = user.map(ApplicantResponse::from);
        self
    }
}

// ============================================================================
// Member Mappers
// ============================================================================

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            nickname: member.nickname,
            username: member.username,
            category: member.category,
            role: member.role,
            telegram: member.telegram,
            description: member.description,
            project: member.project,
            join_date: member.join_date,
            avatar: member.avatar,
            verified: member.verified,
            pinned: member.pinned,
            scam: member.scam,
            activity: member.activity,
            details: member.details,
            skills: member.skills,
            application_id: member.application_id,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

/// Per-category counts in display order
pub fn category_counts(stats: &MemberStats) -> Vec<CategoryCountResponse> {
    stats
        .by_category
        .iter()
        .map(|&(category, count)| CategoryCountResponse { category, count })
        .collect()
}
