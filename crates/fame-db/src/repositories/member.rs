//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use fame_core::{
    Category, DomainError, Member, MemberFilter, MemberRepository, MemberStats, NewMember,
    RepoResult,
};

use crate::mappers::{parse_column, MemberInsert, MemberUpdate};
use crate::models::{CategoryCountModel, MemberModel, MemberTotalsModel};

use super::error::{map_db_error, search_pattern};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, nickname, username, category, role, telegram, description, project,
                   join_date, avatar, verified, pinned, scam, activity, details, skills,
                   application_id, created_at, updated_at
            FROM members
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, nickname, username, category, role, telegram, description, project,
                   join_date, avatar, verified, pinned, scam, activity, details, skills,
                   application_id, created_at, updated_at
            FROM members
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Member::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_public(&self, filter: &MemberFilter) -> RepoResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, nickname, username, category, role, telegram, description, project,
                   join_date, avatar, verified, pinned, scam, activity, details, skills,
                   application_id, created_at, updated_at
            FROM members
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR nickname ILIKE $2 OR username ILIKE $2 OR telegram ILIKE $2)
            ORDER BY pinned DESC, id ASC
            ",
        )
        .bind(filter.category.map(Category::key))
        .bind(search_pattern(filter.search.as_deref()))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(Member::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn next_id(&self) -> RepoResult<i64> {
        // Peek at the identity sequence without consuming a value
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT CASE WHEN is_called THEN last_value + 1 ELSE last_value END
            FROM members_id_seq
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, member), fields(nickname = %member.nickname))]
    async fn create(&self, member: &NewMember) -> RepoResult<Member> {
        let insert = MemberInsert::new(member);

        let model = sqlx::query_as::<_, MemberModel>(
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
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Member::try_from(model)
    }

    #[instrument(skip(self, member), fields(member_id = member.id))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let update = MemberUpdate::new(member);
        let fields = &update.fields;

        let result = sqlx::query(
            r"
            UPDATE members
            SET nickname = $2, username = $3, category = $4, role = $5, telegram = $6,
                description = $7, project = $8, join_date = $9, avatar = $10, verified = $11,
                pinned = $12, scam = $13, activity = $14, details = $15, skills = $16,
                updated_at = $17
            WHERE id = $1
            ",
        )
        .bind(update.id)
        .bind(fields.nickname)
        .bind(fields.username)
        .bind(fields.category)
        .bind(fields.role)
        .bind(fields.telegram)
        .bind(fields.description)
        .bind(fields.project)
        .bind(fields.join_date)
        .bind(fields.avatar)
        .bind(fields.verified)
        .bind(fields.pinned)
        .bind(fields.scam)
        .bind(fields.activity)
        .bind(fields.details)
        .bind(Json(fields.skills))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(member.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> RepoResult<MemberStats> {
        let totals = sqlx::query_as::<_, MemberTotalsModel>(
            r"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE scam) AS scam,
                   COUNT(*) FILTER (WHERE verified) AS verified
            FROM members
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, CategoryCountModel>(
            "SELECT category, COUNT(*) AS count FROM members GROUP BY category",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut counts = Vec::with_capacity(rows.len());
        for row in rows {
            let category: Category = parse_column("members.category", &row.category)?;
            counts.push((category, row.count));
        }

        // Every category appears, in display order
        let by_category = Category::ALL
            .iter()
            .map(|&category| {
                let count = counts
                    .iter()
                    .find(|(c, _)| *c == category)
                    .map_or(0, |(_, n)| *n);
                (category, count)
            })
            .collect();

        Ok(MemberStats {
            total: totals.total,
            scam: totals.scam,
            verified: totals.verified,
            by_category,
        })
    }
}
