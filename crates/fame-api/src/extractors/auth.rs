//! Authentication extractor
//!
//! Resolves the bearer token from the Authorization header to the current user record.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use fame_core::{Identity, User};
use fame_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller
///
/// The role is the one currently stored for the user, not the one the token was issued with.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    pub fn identity(&self) -> Identity {
        self.user.identity()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let user = AuthService::new(app_state.service_context())
            .verify(bearer.token())
            .await?;

        Ok(Self { user })
    }
}
