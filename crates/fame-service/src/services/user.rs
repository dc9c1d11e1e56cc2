//! User service
//!
//! Account maintenance that happens outside the request path.

use fame_common::{hash_password, validate_password_strength, AdminBootstrapConfig};
use fame_core::{NewUser, Role, User};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create the configured administrator unless that username already exists
    ///
    /// Returns the created user, or `None` when nothing was done. Existing accounts
    /// are never modified.
    #[instrument(skip(self, config), fields(username = %config.username))]
    pub async fn ensure_bootstrap_admin(
        &self,
        config: &AdminBootstrapConfig,
    ) -> ServiceResult<Option<User>> {
        if self
            .ctx
            .user_repo()
            .find_by_username(&config.username)
            .await?
            .is_some()
        {
            info!("Bootstrap administrator already present");
            return Ok(None);
        }

        validate_password_strength(&config.password)?;
        let password_hash = hash_password(&config.password)?;
        let new_user =
            NewUser::new(config.username.trim(), &config.email, None).with_role(Role::Admin);

        let user = self.ctx.user_repo().create(&new_user, &password_hash).await?;
        info!(user_id = user.id, "Bootstrap administrator created");
        Ok(Some(user))
    }
}
