//! Application entity <-> model mapper

use fame_core::{Application, DomainError, NewApplication};

use super::parse_column;
use crate::models::ApplicationModel;

impl TryFrom<ApplicationModel> for Application {
    type Error = DomainError;

    fn try_from(model: ApplicationModel) -> Result<Self, Self::Error> {
        Ok(Application {
            id: model.id,
            user_id: model.user_id,
            category: parse_column("applications.category", &model.category)?,
            status: parse_column("applications.status", &model.status)?,
            nickname: model.nickname,
            telegram: model.telegram,
            description: model.description,
            links: model.links.0,
            avatar: model.avatar,
            rejection_reason: model.rejection_reason,
            processed_at: model.processed_at,
            processed_by: model.processed_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Values for an applications insert
pub struct ApplicationInsert<'a> {
    pub user_id: i64,
    pub nickname: &'a str,
    pub telegram: &'a str,
    pub category: &'static str,
    pub description: &'a str,
    pub links: &'a [String],
    pub avatar: Option<&'a str>,
}

impl<'a> ApplicationInsert<'a> {
    pub fn new(application: &'a NewApplication) -> Self {
        Self {
            user_id: application.user_id,
            nickname: &application.nickname,
            telegram: &application.telegram,
            category: application.category.key(),
            description: &application.description,
            links: &application.links,
            avatar: application.avatar.as_deref(),
        }
    }
}
