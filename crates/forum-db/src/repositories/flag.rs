//! PostgreSQL implementation of FlagRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::{check_resolution, ContentFlag, FlagStatus, FlaggedContent, TargetKind};
use forum_core::error::DomainError;
use forum_core::traits::{FlagQuery, FlagRepository, RepoResult};
use forum_core::value_objects::{FlagId, ReplyId, ThreadId, UserId};

use crate::mappers::ContentFlagInsert;
use crate::models::{ContentFlagModel, FlaggedContentModel};

use super::error::{map_db_error, page_bounds, reply_not_found, thread_not_found};

const FLAG_COLUMNS: &str = "id, target_type, target_id, reporter_id, reason, details, status, \
    created_at, reviewed_by, reviewed_at";

/// PostgreSQL implementation of FlagRepository
#[derive(Clone)]
pub struct PgFlagRepository {
    pool: PgPool,
}

impl PgFlagRepository {
    /// Create a new PgFlagRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether the flagged thread or reply exists and is not deleted
    async fn target_is_live(&self, flag: &ContentFlag) -> RepoResult<bool> {
        let sql = match flag.target_type {
            TargetKind::Thread => {
                "SELECT EXISTS(SELECT 1 FROM forum_threads WHERE id = $1 AND deleted_at IS NULL)"
            }
            TargetKind::Reply => {
                r"
                SELECT EXISTS(
                    SELECT 1 FROM forum_replies r
                    JOIN forum_threads t ON t.id = r.thread_id
                    WHERE r.id = $1 AND r.deleted_at IS NULL AND t.deleted_at IS NULL
                )
                "
            }
            TargetKind::User => return Ok(false),
        };

        sqlx::query_scalar::<_, bool>(sql)
            .bind(flag.target_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl FlagRepository for PgFlagRepository {
    #[instrument(skip(self, flag), fields(flag_id = %flag.id, target_type = %flag.target_type))]
    async fn create_flag(&self, flag: &ContentFlag) -> RepoResult<()> {
        if !self.target_is_live(flag).await? {
            return Err(match flag.target_type {
                TargetKind::Reply => reply_not_found(ReplyId::from_uuid(flag.target_id)),
                _ => thread_not_found(ThreadId::from_uuid(flag.target_id)),
            });
        }

        let row = ContentFlagInsert::new(flag);
        let result = sqlx::query(
            r"
            INSERT INTO content_flags
                (id, target_type, target_id, reporter_id, reason, details, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (reporter_id, target_type, target_id) WHERE status = 'pending' DO NOTHING
            ",
        )
        .bind(row.id)
        .bind(row.target_type)
        .bind(row.target_id)
        .bind(row.reporter_id)
        .bind(row.reason)
        .bind(row.details)
        .bind(row.status)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AlreadyFlagged);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: FlagId) -> RepoResult<Option<ContentFlag>> {
        let sql = format!("SELECT {FLAG_COLUMNS} FROM content_flags WHERE id = $1");
        sqlx::query_as::<_, ContentFlagModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?
            .map(ContentFlag::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn resolve_flag(
        &self,
        id: FlagId,
        status: FlagStatus,
        moderator_id: UserId,
    ) -> RepoResult<ContentFlag> {
        check_resolution(status)?;

        let sql = format!(
            "UPDATE content_flags SET status = $2, reviewed_by = $3, reviewed_at = NOW() \
             WHERE id = $1 AND status = 'pending' \
             RETURNING {FLAG_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, ContentFlagModel>(&sql)
            .bind(id.into_inner())
            .bind(status.as_str())
            .bind(moderator_id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        match updated {
            Some(model) => ContentFlag::try_from(model),
            None => match self.find_by_id(id).await? {
                Some(_) => Err(DomainError::FlagAlreadyResolved),
                None => Err(DomainError::FlagNotFound(id)),
            },
        }
    }

    #[instrument(skip(self))]
    async fn list_flags(&self, query: &FlagQuery) -> RepoResult<Vec<FlaggedContent>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);

        let rows = sqlx::query_as::<_, FlaggedContentModel>(
            r"
            SELECT
                cf.id, cf.target_type, cf.target_id, cf.reporter_id, cf.reason, cf.details,
                cf.status, cf.created_at, cf.reviewed_by, cf.reviewed_at,
                ft.title AS title,
                COALESCE(ft.content, fr.content) AS content,
                (
                    SELECT COUNT(*) FROM content_flags other
                    WHERE other.target_type = cf.target_type AND other.target_id = cf.target_id
                ) AS flag_count
            FROM content_flags cf
            LEFT JOIN forum_threads ft
                ON cf.target_type = 'thread' AND ft.id = cf.target_id AND ft.deleted_at IS NULL
            LEFT JOIN forum_replies fr
                ON cf.target_type = 'reply' AND fr.id = cf.target_id AND fr.deleted_at IS NULL
            WHERE cf.status = $1
            ORDER BY cf.created_at DESC, cf.id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(query.status.as_str())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(FlaggedContent::try_from).collect()
    }
}
