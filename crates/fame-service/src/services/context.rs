//! Service context - dependency container for services
//!
//! Holds the repositories, the token service, avatar storage and the event publisher.
//! The context carries no database pool, so services run unchanged over any
//! repository implementation.

use std::sync::Arc;

use fame_common::JwtService;
use fame_core::{ApplicationRepository, DomainEvent, EventPublisher, MemberRepository, UserRepository};
use tracing::warn;

use crate::storage::AvatarStore;

use super::error::{ServiceError, ServiceResult};
use super::notifier::LoggingEventPublisher;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    application_repo: Arc<dyn ApplicationRepository>,
    member_repo: Arc<dyn MemberRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    avatar_store: Arc<AvatarStore>,
    publisher: Arc<dyn EventPublisher>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        application_repo: Arc<dyn ApplicationRepository>,
        member_repo: Arc<dyn MemberRepository>,
        jwt_service: Arc<JwtService>,
        avatar_store: Arc<AvatarStore>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            user_repo,
            application_repo,
            member_repo,
            jwt_service,
            avatar_store,
            publisher,
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn application_repo(&self) -> &dyn ApplicationRepository {
        self.application_repo.as_ref()
    }

    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn avatar_store(&self) -> &AvatarStore {
        self.avatar_store.as_ref()
    }

    /// Publish an event after a committed change
    ///
    /// Delivery failures are logged; the change they describe has already happened.
    pub async fn publish(&self, event: DomainEvent) {
        if let Err(e) = self.publisher.publish(&event).await {
            warn!(event_type = event.event_type(), error = %e, "Failed to publish event");
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("avatar_store", &self.avatar_store)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    application_repo: Option<Arc<dyn ApplicationRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    avatar_store: Option<Arc<AvatarStore>>,
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn application_repo(mut self, repo: Arc<dyn ApplicationRepository>) -> Self {
        self.application_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn avatar_store(mut self, store: Arc<AvatarStore>) -> Self {
        self.avatar_store = Some(store);
        self
    }

    /// Defaults to [`LoggingEventPublisher`]
    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let missing = |name: &str| ServiceError::internal(format!("{name} is required"));

        Ok(ServiceContext::new(
            self.user_repo.ok_or_else(|| missing("user_repo"))?,
            self.application_repo.ok_or_else(|| missing("application_repo"))?,
            self.member_repo.ok_or_else(|| missing("member_repo"))?,
            self.jwt_service.ok_or_else(|| missing("jwt_service"))?,
            self.avatar_store.ok_or_else(|| missing("avatar_store"))?,
            self.publisher
                .unwrap_or_else(|| Arc::new(LoggingEventPublisher::new())),
        ))
    }
}
