//! PostgreSQL implementation of ApplicationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};

use fame_core::{
    Application, ApplicationFilter, ApplicationRepository, ApplicationStatus, Decision,
    DomainError, Member, NewApplication, NewMember, RepoResult,
};

use crate::mappers::{parse_column, ApplicationInsert, MemberInsert};
use crate::models::{ApplicationModel, MemberModel};

use super::error::{map_db_error, map_unique_violation, search_pattern};

/// PostgreSQL implementation of ApplicationRepository
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Explain why a conditional transition matched no row
async fn refuse_transition(conn: &mut PgConnection, id: i64) -> DomainError {
    let status = sqlx::query_scalar::<_, String>("SELECT status FROM applications WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await;

    match status {
        Ok(None) => DomainError::ApplicationNotFound(id),
        Ok(Some(raw)) => match parse_column::<ApplicationStatus>("applications.status", &raw) {
            Ok(status) => DomainError::ApplicationAlreadyProcessed { id, status },
            Err(e) => e,
        },
        Err(e) => map_db_error(e),
    }
}

/// Lock the row, run the state machine on it and persist the outcome
///
/// Concurrent deciders queue on the row lock; the later one sees the terminal status
/// and is refused by `Application::decide`.
async fn decide_locked(
    conn: &mut PgConnection,
    id: i64,
    decision: &Decision,
    admin_id: i64,
    at: DateTime<Utc>,
) -> RepoResult<Application> {
    let current = sqlx::query_as::<_, ApplicationModel>(
        r"
        SELECT id, user_id, nickname, telegram, category, description, links, avatar,
               status, rejection_reason, processed_at, processed_by, created_at, updated_at
        FROM applications
        WHERE id = $1
        FOR UPDATE
        ",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?
    .ok_or(DomainError::ApplicationNotFound(id))?;

    let mut application = Application::try_from(current)?;
    application.decide(decision, admin_id, at)?;

    let updated = sqlx::query_as::<_, ApplicationModel>(
        r"
        UPDATE applications
        SET status = $2, rejection_reason = $3, processed_at = $4, processed_by = $5,
            updated_at = $4
        WHERE id = $1 AND status = 'pending'
        RETURNING id, user_id, nickname, telegram, category, description, links, avatar,
                  status, rejection_reason, processed_at, processed_by, created_at, updated_at
        ",
    )
    .bind(id)
    .bind(application.status.as_str())
    .bind(application.rejection_reason.as_deref())
    .bind(at)
    .bind(admin_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(map_db_error)?;

    match updated {
        Some(model) => Application::try_from(model),
        None => Err(refuse_transition(conn, id).await),
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Application>> {
        let result = sqlx::query_as::<_, ApplicationModel>(
            r"
            SELECT id, user_id, nickname, telegram, category, description, links, avatar,
                   status, rejection_reason, processed_at, processed_by, created_at, updated_at
            FROM applications
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Application::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Application>> {
        let rows = sqlx::query_as::<_, ApplicationModel>(
            r"
            SELECT id, user_id, nickname, telegram, category, description, links, avatar,
                   status, rejection_reason, processed_at, processed_by, created_at, updated_at
            FROM applications
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Application::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        filter: &ApplicationFilter,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<Application>> {
        let rows = sqlx::query_as::<_, ApplicationModel>(
            r"
            SELECT id, user_id, nickname, telegram, category, description, links, avatar,
                   status, rejection_reason, processed_at, processed_by, created_at, updated_at
            FROM applications
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL OR nickname ILIKE $3 OR telegram ILIKE $3)
            ORDER BY created_at DESC, id DESC
            LIMIT $4 OFFSET $5
            ",
        )
        .bind(filter.status.map(ApplicationStatus::as_str))
        .bind(filter.category.map(|c| c.key()))
        .bind(search_pattern(filter.search.as_deref()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Application::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &ApplicationFilter) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM applications
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR category = $2)
              AND ($3::text IS NULL OR nickname ILIKE $3 OR telegram ILIKE $3)
            ",
        )
        .bind(filter.status.map(ApplicationStatus::as_str))
        .bind(filter.category.map(|c| c.key()))
        .bind(search_pattern(filter.search.as_deref()))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, application), fields(user_id = application.user_id))]
    async fn create(&self, application: &NewApplication) -> RepoResult<Application> {
        let insert = ApplicationInsert::new(application);

        let model = sqlx::query_as::<_, ApplicationModel>(
            r"
            INSERT INTO applications (user_id, nickname, telegram, category, description, links, avatar)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, nickname, telegram, category, description, links, avatar,
                      status, rejection_reason, processed_at, processed_by, created_at, updated_at
            ",
        )
        .bind(insert.user_id)
        .bind(insert.nickname)
        .bind(insert.telegram)
        .bind(insert.category)
        .bind(insert.description)
        .bind(Json(insert.links))
        .bind(insert.avatar)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, |constraint| {
                (constraint == Some("applications_one_pending_per_user"))
                    .then_some(DomainError::ActiveApplicationExists)
            })
        })?;

        Application::try_from(model)
    }

    #[instrument(skip(self, member))]
    async fn approve(
        &self,
        id: i64,
        admin_id: i64,
        at: DateTime<Utc>,
        member: &NewMember,
    ) -> RepoResult<(Application, Member)> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let decided = decide_locked(&mut *tx, id, &Decision::Approve, admin_id, at).await;
        let application = match decided {
            Ok(application) => application,
            Err(refusal) => {
                tx.rollback().await.map_err(map_db_error)?;
                return Err(refusal);
            }
        };

        let insert = MemberInsert::new(member);
        let member_model = sqlx::query_as::<_, MemberModel>(
            r"
            INSERT INTO members (nickname, username, category, role, telegram, description,
                                 project, join_date, avatar, verified, pinned, scam, activity,
                                 details, skills, application_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id, nickname, username, category, role, telegram, description, project,
                      join_date, avatar, verified, pinned, scam, activity, details, skills,
                      application_id, created_at, updated_at
            ",
        )
        .bind(insert.nickname)
        .bind(insert.username)
        .bind(insert.category)
        .bind(insert.role)
        .bind(insert.telegram)
        .bind(insert.description)
        .bind(insert.project)
        .bind(insert.join_date)
        .bind(insert.avatar)
        .bind(insert.verified)
        .bind(insert.pinned)
        .bind(insert.scam)
        .bind(insert.activity)
        .bind(insert.details)
        .bind(Json(insert.skills))
        .bind(insert.application_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        let member = Member::try_from(member_model)?;
        info!(application_id = id, member_id = member.id, "Application approved and member created");

        Ok((application, member))
    }

    #[instrument(skip(self, reason))]
    async fn reject(
        &self,
        id: i64,
        admin_id: i64,
        reason: &str,
        at: DateTime<Utc>,
    ) -> RepoResult<Application> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let decision = Decision::Reject {
            reason: reason.to_string(),
        };

        match decide_locked(&mut *tx, id, &decision, admin_id, at).await {
            Ok(application) => {
                tx.commit().await.map_err(map_db_error)?;
                Ok(application)
            }
            Err(refusal) => {
                tx.rollback().await.map_err(map_db_error)?;
                Err(refusal)
            }
        }
    }
}
