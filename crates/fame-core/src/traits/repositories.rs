//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Application, ApplicationFilter, Member, MemberFilter, MemberStats, NewApplication, NewMember,
    NewUser, User,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by username, ignoring case
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find user by username or email, both ignoring case
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>>;

    /// Create a new user
    ///
    /// Fails with `UsernameTaken` or `EmailAlreadyExists` on a uniqueness violation.
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>>;

    /// Record a successful login
    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()>;

    /// Total number of users
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Application Repository
// ============================================================================

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find application by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Application>>;

    /// All applications of a user, newest first
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Application>>;

    /// Page of applications matching a filter, newest first
    async fn search(
        &self,
        filter: &ApplicationFilter,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<Application>>;

    /// Number of applications matching a filter
    async fn count(&self, filter: &ApplicationFilter) -> RepoResult<i64>;

    /// Persist a new pending application
    ///
    /// Fails with `ActiveApplicationExists` if the user already has a pending one.
    async fn create(&self, application: &NewApplication) -> RepoResult<Application>;

    /// Mark a pending application approved and materialize its member, atomically
    ///
    /// Fails with `ApplicationNotFound` or `ApplicationAlreadyProcessed` without
    /// changing anything.
    async fn approve(
        &self,
        id: i64,
        admin_id: i64,
        at: DateTime<Utc>,
        member: &NewMember,
    ) -> RepoResult<(Application, Member)>;

    /// Mark a pending application rejected
    async fn reject(
        &self,
        id: i64,
        admin_id: i64,
        reason: &str,
        at: DateTime<Utc>,
    ) -> RepoResult<Application>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Find member by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>>;

    /// Every member, ordered by id ascending
    async fn list_all(&self) -> RepoResult<Vec<Member>>;

    /// Public listing: pinned first, then by id
    async fn list_public(&self, filter: &MemberFilter) -> RepoResult<Vec<Member>>;

    /// Id the next created member is expected to receive
    async fn next_id(&self) -> RepoResult<i64>;

    /// Create a new member; the id is assigned atomically by storage
    async fn create(&self, member: &NewMember) -> RepoResult<Member>;

    /// Overwrite an existing member's mutable fields
    async fn update(&self, member: &Member) -> RepoResult<()>;

    /// Delete a member
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Aggregate counts
    async fn stats(&self) -> RepoResult<MemberStats>;
}
