//! User entity <-> model mapper

use fame_core::{DomainError, NewUser, User};

use super::parse_column;
use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            role: parse_column("users.role", &model.role)?,
            username: model.username,
            email: model.email,
            telegram: model.telegram,
            last_login: model.last_login,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Values for a users insert
pub struct UserInsert<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub telegram: Option<&'a str>,
    pub role: &'static str,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a NewUser, password_hash: &'a str) -> Self {
        Self {
            username: &user.username,
            email: &user.email,
            password_hash,
            telegram: user.telegram.as_deref(),
            role: user.role.as_str(),
        }
    }
}
