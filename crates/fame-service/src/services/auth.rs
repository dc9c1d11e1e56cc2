//! Authentication service
//!
//! Handles registration, login, token verification, and logout.

use chrono::Utc;
use fame_common::{validate_password_strength, AppError, PasswordService};
use fame_core::events::UserRegisteredEvent;
use fame_core::{CredentialFailure, DomainEvent, Identity, NewUser, User};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
    passwords: PasswordService,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            passwords: PasswordService::new(),
        }
    }

    /// Register a new user with role `user`
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        let username = request.username.trim();
        if username.chars().count() < 3 {
            return Err(ServiceError::validation(
                "Username must be at least 3 characters long",
            ));
        }
        let telegram = request
            .telegram
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let new_user = NewUser::new(username, &request.email, telegram);
        let password_hash = self.passwords.hash(&request.password)?;

        // Uniqueness is enforced by storage; a lost race surfaces as the same conflict
        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;

        info!(user_id = user.id, "User registered successfully");
        self.ctx
            .publish(DomainEvent::UserRegistered(UserRegisteredEvent::new(
                user.id,
                user.username.clone(),
            )))
            .await;

        let token = self.ctx.jwt_service().issue(&user.identity(), false)?;
        Ok(AuthResponse::new(
            "Registration successful",
            token,
            UserResponse::from(&user),
        ))
    }

    /// Login with username or email
    ///
    /// Both failure reasons produce the same public error; only the log tells them apart.
    #[instrument(skip(self, request), fields(login = %request.username, remember = request.remember))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let login = request.username.trim();

        let Some(user) = self.ctx.user_repo().find_by_login(login).await? else {
            return Err(reject_login(None, CredentialFailure::UnknownIdentity));
        };

        let Some(password_hash) = self.ctx.user_repo().get_password_hash(user.id).await? else {
            return Err(reject_login(Some(user.id), CredentialFailure::UnknownIdentity));
        };

        if !self.passwords.verify(&request.password, &password_hash)? {
            return Err(reject_login(Some(user.id), CredentialFailure::BadPassword));
        }

        self.ctx
            .user_repo()
            .touch_last_login(user.id, Utc::now())
            .await?;

        info!(user_id = user.id, "User logged in successfully");

        let token = self
            .ctx
            .jwt_service()
            .issue(&user.identity(), request.remember)?;
        Ok(AuthResponse::new(
            "Login successful",
            token,
            UserResponse::from(&user),
        ))
    }

    /// Resolve a bearer token to the current user record
    ///
    /// The role comes from storage, not from the token, so role changes apply at once.
    #[instrument(skip(self, token))]
    pub async fn verify(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().decode_token(token)?;

        self.ctx
            .user_repo()
            .find_by_id(claims.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = claims.id, "Token references a missing user");
                ServiceError::App(AppError::InvalidToken)
            })
    }

    /// Acknowledge a logout
    ///
    /// Tokens are not revocable server-side: the token stays valid until it expires and
    /// the client is expected to discard it.
    #[instrument(skip(self), fields(user_id = identity.id))]
    pub async fn logout(&self, identity: &Identity) -> ServiceResult<MessageResponse> {
        info!("User logged out");
        Ok(MessageResponse::ok("Logged out"))
    }
}

fn reject_login(user_id: Option<i64>, reason: CredentialFailure) -> ServiceError {
    warn!(?user_id, %reason, "Login failed");
    ServiceError::App(AppError::InvalidCredentials(reason))
}
