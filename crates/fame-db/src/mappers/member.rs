//! Member entity <-> model mapper

use chrono::NaiveDate;
use fame_core::{DomainError, Member, NewMember};

use super::parse_column;
use crate::models::MemberModel;

impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        Ok(Member {
            id: model.id,
            category: parse_column("members.category", &model.category)?,
            nickname: model.nickname,
            username: model.username,
            role: model.role,
            telegram: model.telegram,
            description: model.description,
            project: model.project,
            join_date: model.join_date,
            avatar: model.avatar,
            verified: model.verified,
            pinned: model.pinned,
            scam: model.scam,
            activity: model.activity,
            details: model.details,
            skills: model.skills.0,
            application_id: model.application_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Values for a members insert
pub struct MemberInsert<'a> {
    pub nickname: &'a str,
    pub username: &'a str,
    pub category: &'static str,
    pub role: Option<&'a str>,
    pub telegram: Option<&'a str>,
    pub description: &'a str,
    pub project: Option<&'a str>,
    pub join_date: NaiveDate,
    pub avatar: Option<&'a str>,
    pub verified: bool,
    pub pinned: bool,
    pub scam: bool,
    pub activity: Option<&'a str>,
    pub details: Option<&'a str>,
    pub skills: &'a [String],
    pub application_id: Option<i64>,
}

impl<'a> MemberInsert<'a> {
    pub fn new(member: &'a NewMember) -> Self {
        Self {
            nickname: &member.nickname,
            username: &member.username,
            category: member.category.key(),
            role: member.role.as_deref(),
            telegram: member.telegram.as_deref(),
            description: &member.description,
            project: member.project.as_deref(),
            join_date: member.join_date,
            avatar: member.avatar.as_deref(),
            verified: member.verified,
            pinned: member.pinned,
            scam: member.scam,
            activity: member.activity.as_deref(),
            details: member.details.as_deref(),
            skills: &member.skills,
            application_id: member.application_id,
        }
    }
}

/// Values for a members update; the id and the application link never change
pub struct MemberUpdate<'a> {
    pub id: i64,
    pub fields: MemberInsert<'a>,
}

impl<'a> MemberUpdate<'a> {
    pub fn new(member: &'a Member) -> Self {
        Self {
            id: member.id,
            fields: MemberInsert {
                nickname: &member.nickname,
                username: &member.username,
                category: member.category.key(),
                role: member.role.as_deref(),
                telegram: member.telegram.as_deref(),
                description: &member.description,
                project: member.project.as_deref(),
                join_date: member.join_date,
                avatar: member.avatar.as_deref(),
                verified: member.verified,
                pinned: member.pinned,
                scam: member.scam,
                activity: member.activity.as_deref(),
                details: member.details.as_deref(),
                skills: &member.skills,
                application_id: member.application_id,
            },
        }
    }
}
