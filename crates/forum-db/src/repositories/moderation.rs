//! PostgreSQL implementation of ModerationRepository

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use forum_core::entities::{ModerationAction, ModerationDetail, Thread};
use forum_core::error::DomainError;
use forum_core::traits::{ModerationQuery, ModerationRepository, RepoResult};
use forum_core::value_objects::ThreadId;

use crate::mappers::ModerationActionInsert;
use crate::models::{ModerationActionModel, ThreadModel};

use super::error::{map_db_error, page_bounds, thread_not_found};
use super::thread::THREAD_COLUMNS;

/// Append one entry to the moderation log on an open transaction
pub(crate) async fn append_action(conn: &mut PgConnection, action: &ModerationAction) -> RepoResult<()> {
    let row = ModerationActionInsert::new(action);

    sqlx::query(
        r"
        INSERT INTO moderation_actions
            (id, moderator_id, action_type, target_type, target_id, reason, metadata, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ",
    )
    .bind(row.id)
    .bind(row.moderator_id)
    .bind(row.action_type)
    .bind(row.target_type)
    .bind(row.target_id)
    .bind(row.reason)
    .bind(row.metadata)
    .bind(row.created_at)
    .execute(conn)
    .await
    .map_err(map_db_error)?;

    Ok(())
}

/// State change for a thread action. `$1` thread id, `$2` moderator id.
fn thread_update_set(detail: &ModerationDetail) -> RepoResult<&'static str> {
    let set = match detail {
        ModerationDetail::LockThread { .. } => {
            "locked = TRUE, locked_at = CASE WHEN locked THEN locked_at ELSE NOW() END"
        }
        ModerationDetail::UnlockThread { .. } => "locked = FALSE, locked_at = NULL",
        ModerationDetail::PinThread { .. } => "pinned = TRUE",
        ModerationDetail::UnpinThread { .. } => "pinned = FALSE",
        ModerationDetail::DeleteThread { .. } => "deleted_at = NOW(), deleted_by = $2",
        ModerationDetail::BanUser { .. } | ModerationDetail::UnbanUser { .. } => {
            return Err(DomainError::InternalError(format!(
                "{} is not a thread action",
                detail.action_type()
            )))
        }
    };
    Ok(set)
}

/// PostgreSQL implementation of ModerationRepository
#[derive(Clone)]
pub struct PgModerationRepository {
    pool: PgPool,
}

impl PgModerationRepository {
    /// Create a new PgModerationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModerationRepository for PgModerationRepository {
    #[instrument(skip(self, action), fields(action_id = %action.id, action_type = %action.action_type()))]
    async fn apply_thread_action(&self, action: &ModerationAction) -> RepoResult<Thread> {
        let set = thread_update_set(&action.detail)?;
        let thread_id: ThreadId = action
            .detail
            .thread_id()
            .ok_or_else(|| DomainError::InternalError("thread action without thread".to_string()))?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // $2 is only referenced by the delete transition
        let sql = format!(
            "UPDATE forum_threads SET {set}, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
             RETURNING {THREAD_COLUMNS}"
        );
        let thread = sqlx::query_as::<_, ThreadModel>(&sql)
            .bind(thread_id.into_inner())
            .bind(action.moderator_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .map(Thread::from)
            .ok_or_else(|| thread_not_found(thread_id))?;

        append_action(&mut *tx, action).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(thread)
    }

    #[instrument(skip(self))]
    async fn list_actions(&self, query: &ModerationQuery) -> RepoResult<Vec<ModerationAction>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);

        let rows = sqlx::query_as::<_, ModerationActionModel>(
            r"
            SELECT id, moderator_id, action_type, target_type, target_id, reason, metadata, created_at
            FROM moderation_actions
            WHERE ($1::text IS NULL OR action_type = $1)
              AND ($2::text IS NULL OR target_type = $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            ",
        )
        .bind(query.action.map(|a| a.as_str()))
        .bind(query.target_type.map(|t| t.as_str()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        rows.into_iter().map(ModerationAction::try_from).collect()
    }
}
