//! In-memory repository fakes and a ready-made service context

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fame_common::JwtService;
use fame_core::{
    Application, ApplicationFilter, ApplicationRepository, ApplicationStatus, Category, Decision,
    DomainError, DomainEvent, EventPublisher, Identity, Member, MemberFilter, MemberRepository,
    MemberStats, NewApplication, NewMember, NewUser, RepoResult, Role, User, UserRepository,
};
use fame_service::{AvatarStore, ServiceContext, ServiceContextBuilder};
use tempfile::TempDir;

pub const PNG_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Same predicate as the application listing query
fn application_matches(filter: &ApplicationFilter, application: &Application) -> bool {
    filter.status.is_none_or(|s| s == application.status)
        && filter.category.is_none_or(|c| c == application.category)
        && filter.search.as_deref().is_none_or(|term| {
            contains_ignoring_case(&application.nickname, term)
                || contains_ignoring_case(&application.telegram, term)
        })
}

/// Same predicate as the public member listing query
fn member_matches(filter: &MemberFilter, member: &Member) -> bool {
    filter.category.is_none_or(|c| c == member.category)
        && filter.search.as_deref().is_none_or(|term| {
            contains_ignoring_case(&member.nickname, term)
                || contains_ignoring_case(&member.username, term)
                || member
                    .telegram
                    .as_deref()
                    .is_some_and(|t| contains_ignoring_case(t, term))
        })
}

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    applications: Vec<Application>,
    members: Vec<Member>,
    user_seq: i64,
    application_seq: i64,
    member_seq: i64,
}

/// One store implementing all three repositories
#[derive(Default)]
pub struct FakeDb {
    state: Mutex<State>,
}

impl FakeDb {
    pub fn application(&self, id: i64) -> Option<Application> {
        let state = self.state.lock().unwrap();
        state.applications.iter().find(|a| a.id == id).cloned()
    }

    pub fn members(&self) -> Vec<Member> {
        self.state.lock().unwrap().members.clone()
    }

    pub fn user(&self, id: i64) -> Option<User> {
        let state = self.state.lock().unwrap();
        state.users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone())
    }

    fn insert_member(state: &mut State, member: &NewMember) -> Member {
        state.member_seq += 1;
        let now = Utc::now();
        let created = Member {
            id: state.member_seq,
            nickname: member.nickname.clone(),
            username: member.username.clone(),
            category: member.category,
            role: member.role.clone(),
            telegram: member.telegram.clone(),
            description: member.description.clone(),
            project: member.project.clone(),
            join_date: member.join_date,
            avatar: member.avatar.clone(),
            verified: member.verified,
            pinned: member.pinned,
            scam: member.scam,
            activity: member.activity.clone(),
            details: member.details.clone(),
            skills: member.skills.clone(),
            application_id: member.application_id,
            created_at: now,
            updated_at: now,
        };
        state.members.push(created.clone());
        created
    }

    fn decide(
        &self,
        id: i64,
        decision: &Decision,
        admin_id: i64,
        at: DateTime<Utc>,
    ) -> RepoResult<(Application, std::sync::MutexGuard<'_, State>)> {
        let mut state = self.state.lock().unwrap();
        let application = state
            .applications
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(DomainError::ApplicationNotFound(id))?;
        application.decide(decision, admin_id, at)?;
        let decided = application.clone();
        Ok((decided, state))
    }
}

#[async_trait]
impl UserRepository for FakeDb {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|(u, _)| u.username.eq_ignore_ascii_case(username))
            .map(|(u, _)| u.clone()))
    }

    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock().unwrap();
        let email = login.to_lowercase();
        Ok(state
            .users
            .iter()
            .find(|(u, _)| u.username.to_lowercase() == email)
            .or_else(|| state.users.iter().find(|(u, _)| u.email == email))
            .map(|(u, _)| u.clone()))
    }

    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|(u, _)| u.username.to_lowercase() == user.username.to_lowercase()) {
            return Err(DomainError::UsernameTaken);
        }
        if state.users.iter().any(|(u, _)| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        state.user_seq += 1;
        let now = Utc::now();
        let created = User {
            id: state.user_seq,
            username: user.username.clone(),
            email: user.email.clone(),
            telegram: user.telegram.clone(),
            role: user.role,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        state.users.push((created.clone(), password_hash.to_string()));
        Ok(created)
    }

    async fn get_password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(_, h)| h.clone()))
    }

    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        let (user, _) = state
            .users
            .iter_mut()
            .find(|(u, _)| u.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        user.last_login = Some(at);
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.state.lock().unwrap().users.len() as i64)
    }
}

#[async_trait]
impl ApplicationRepository for FakeDb {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Application>> {
        Ok(self.application(id))
    }

    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Application>> {
        let state = self.state.lock().unwrap();
        let mut found: Vec<_> = state
            .applications
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(found)
    }

    async fn search(
        &self,
        filter: &ApplicationFilter,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<Application>> {
        let state = self.state.lock().unwrap();
        let mut found: Vec<_> = state
            .applications
            .iter()
            .filter(|a| application_matches(filter, a))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(found
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &ApplicationFilter) -> RepoResult<i64> {
        let state = self.state.lock().unwrap();
        Ok(state.applications.iter().filter(|a| application_matches(filter, a)).count() as i64)
    }

    async fn create(&self, application: &NewApplication) -> RepoResult<Application> {
        let mut state = self.state.lock().unwrap();
        if state
            .applications
            .iter()
            .any(|a| a.user_id == application.user_id && a.is_pending())
        {
            return Err(DomainError::ActiveApplicationExists);
        }
        state.application_seq += 1;
        let now = Utc::now();
        let created = Application {
            id: state.application_seq,
            user_id: application.user_id,
            nickname: application.nickname.clone(),
            telegram: application.telegram.clone(),
            category: application.category,
            description: application.description.clone(),
            links: application.links.clone(),
            avatar: application.avatar.clone(),
            status: ApplicationStatus::Pending,
            rejection_reason: None,
            processed_at: None,
            processed_by: None,
            created_at: now,
            updated_at: now,
        };
        state.applications.push(created.clone());
        Ok(created)
    }

    async fn approve(
        &self,
        id: i64,
        admin_id: i64,
        at: DateTime<Utc>,
        member: &NewMember,
    ) -> RepoResult<(Application, Member)> {
        let (application, mut state) = self.decide(id, &Decision::Approve, admin_id, at)?;
        let member = Self::insert_member(&mut state, member);
        Ok((application, member))
    }

    async fn reject(
        &self,
        id: i64,
        admin_id: i64,
        reason: &str,
        at: DateTime<Utc>,
    ) -> RepoResult<Application> {
        let decision = Decision::Reject {
            reason: reason.to_string(),
        };
        let (application, _state) = self.decide(id, &decision, admin_id, at)?;
        Ok(application)
    }
}

#[async_trait]
impl MemberRepository for FakeDb {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>> {
        let state = self.state.lock().unwrap();
        Ok(state.members.iter().find(|m| m.id == id).cloned())
    }

    async fn list_all(&self) -> RepoResult<Vec<Member>> {
        let mut members = self.members();
        members.sort_by_key(|m| m.id);
        Ok(members)
    }

    async fn list_public(&self, filter: &MemberFilter) -> RepoResult<Vec<Member>> {
        let mut members: Vec<_> = self
            .members()
            .into_iter()
            .filter(|m| member_matches(filter, m))
            .collect();
        members.sort_by_key(|m| (!m.pinned, m.id));
        Ok(members)
    }

    async fn next_id(&self) -> RepoResult<i64> {
        Ok(self.state.lock().unwrap().member_seq + 1)
    }

    async fn create(&self, member: &NewMember) -> RepoResult<Member> {
        let mut state = self.state.lock().unwrap();
        Ok(Self::insert_member(&mut state, member))
    }

    async fn update(&self, member: &Member) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .members
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or(DomainError::MemberNotFound(member.id))?;
        *slot = member.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        let mut state = self.state.lock().unwrap();
        let before = state.members.len();
        state.members.retain(|m| m.id != id);
        if state.members.len() == before {
            return Err(DomainError::MemberNotFound(id));
        }
        Ok(())
    }

    async fn stats(&self) -> RepoResult<MemberStats> {
        let members = self.members();
        let count = |pred: &dyn Fn(&Member) -> bool| members.iter().filter(|m| pred(m)).count() as i64;
        Ok(MemberStats {
            total: members.len() as i64,
            scam: count(&|m| m.scam),
            verified: count(&|m| m.verified),
            by_category: Category::ALL
                .iter()
                .map(|&c| (c, count(&|m| m.category == c)))
                .collect(),
        })
    }
}

/// Captures published events
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingPublisher {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(DomainEvent::event_type)
            .collect()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), DomainError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// Service context over the fakes, with avatars in a temporary directory
pub struct TestEnv {
    pub ctx: ServiceContext,
    pub db: Arc<FakeDb>,
    pub events: Arc<RecordingPublisher>,
    pub avatar_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let db = Arc::new(FakeDb::default());
        let events = Arc::new(RecordingPublisher::default());
        let avatar_dir = tempfile::tempdir().unwrap();

        let ctx = ServiceContextBuilder::new()
            .user_repo(db.clone())
            .application_repo(db.clone())
            .member_repo(db.clone())
            .jwt_service(Arc::new(JwtService::new("test-secret", 3600, 7200)))
            .avatar_store(Arc::new(AvatarStore::new(avatar_dir.path(), 1024 * 1024)))
            .publisher(events.clone())
            .build()
            .unwrap();

        Self {
            ctx,
            db,
            events,
            avatar_dir,
        }
    }

    /// Create an account directly in storage
    pub async fn identity(&self, username: &str, role: Role) -> Identity {
        let new_user = NewUser::new(username, &format!("{username}@example.com"), None).with_role(role);
        UserRepository::create(self.db.as_ref(), &new_user, "unused-hash")
            .await
            .unwrap()
            .identity()
    }

    pub fn avatar_exists(&self, reference: &str) -> bool {
        let relative = reference.strip_prefix("img/").unwrap_or(reference);
        self.avatar_dir.path().join(relative).exists()
    }
}
