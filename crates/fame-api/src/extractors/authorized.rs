//! Role-gated authentication extractor
//!
//! `Authorized<G>` authenticates the caller and consults the access table for the
//! guarded operation before any later extractor looks at the path or body.

use std::marker::PhantomData;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use fame_core::{authorize_operation, Identity, Operation, User};
use tracing::debug;

use super::AuthUser;
use crate::response::ApiError;
use crate::state::AppState;

/// The operation a route is gated on
pub trait Guard: Send + Sync + 'static {
    const OPERATION: Operation;
}

/// Generates one marker type per gated operation, named after the operation.
macro_rules! define_guards {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl Guard for $name {
                const OPERATION: Operation = Operation::$name;
            }
        )*
    };
}

/// Marker types for `Authorized`
pub mod guards {
    use super::{Guard, Operation};

    define_guards!(
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
    );
}

/// Authenticated caller whose role is admitted for `G::OPERATION`
///
/// Must come before `IdPath`, `ValidatedJson` or `Multipart` in the handler
/// signature: a denied caller gets 403 no matter how malformed the request is.
#[derive(Debug, Clone)]
pub struct Authorized<G> {
    pub user: User,
    guard: PhantomData<fn() -> G>,
}

impl<G> Authorized<G> {
    pub fn identity(&self) -> Identity {
        self.user.identity()
    }
}

#[async_trait]
impl<S, G> FromRequestParts<S> for Authorized<G>
where
    S: Send + Sync,
    AppState: FromRef<S>,
    G: Guard,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser { user } = AuthUser::from_request_parts(parts, state).await?;

        if let Err(denied) = authorize_operation(&user.identity(), G::OPERATION) {
            debug!(
                user_id = user.id,
                operation = %G::OPERATION,
                "Request denied by access table"
            );
            return Err(denied.into());
        }

        Ok(Self {
            user,
            guard: PhantomData,
        })
    }
}
