//! PostgreSQL implementation of ReplyRepository
//!
//! Reply insertion is the one write that touches shared state: the thread row
//! is locked (`FOR NO KEY UPDATE`) for the whole transaction, so the lock
//! check, the parent's depth read, the insert and the reply-count bump all
//! see the same thread state. Path allocation itself needs no lock because
//! each segment comes from the new reply's own id.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use forum_core::entities::{Reply, ReplyDraft, Thread};
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, ReplyRepository};
use forum_core::value_objects::{Actor, ReplyId, ReplyPlacement, ThreadId, UserId};

use crate::mappers::ReplyInsert;
use crate::models::{ReplyModel, ThreadModel};

use super::error::{map_db_error, reply_not_found, thread_not_found};
use super::thread::THREAD_COLUMNS;

/// Column list matching [`ReplyModel`]
const REPLY_COLUMNS: &str = "id, thread_id, parent_reply_id, author_id, content, depth, path, \
    deleted_at, deleted_by, created_at, updated_at";

/// PostgreSQL implementation of ReplyRepository
#[derive(Clone)]
pub struct PgReplyRepository {
    pool: PgPool,
}

impl PgReplyRepository {
    /// Create a new PgReplyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReplyRepository for PgReplyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReplyId) -> RepoResult<Option<Reply>> {
        let sql = format!("SELECT {REPLY_COLUMNS} FROM forum_replies WHERE id = $1");
        let result = sqlx::query_as::<_, ReplyModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Reply::from))
    }

    #[instrument(skip(self))]
    async fn find_by_thread(&self, thread_id: ThreadId) -> RepoResult<Vec<Reply>> {
        let sql = format!("SELECT {REPLY_COLUMNS} FROM forum_replies WHERE thread_id = $1 ORDER BY path");
        let results = sqlx::query_as::<_, ReplyModel>(&sql)
            .bind(thread_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reply::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_children(&self, parent_id: ReplyId) -> RepoResult<Vec<Reply>> {
        let sql = format!(
            "SELECT {REPLY_COLUMNS} FROM forum_replies \
             WHERE parent_reply_id = $1 AND deleted_at IS NULL ORDER BY path"
        );
        let results = sqlx::query_as::<_, ReplyModel>(&sql)
            .bind(parent_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Reply::from).collect())
    }

    #[instrument(skip(self, draft), fields(reply_id = %draft.id, thread_id = %draft.thread_id))]
    async fn create(&self, draft: &ReplyDraft, actor: &Actor) -> RepoResult<Reply> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let lock_sql = format!("SELECT {THREAD_COLUMNS} FROM forum_threads WHERE id = $1 FOR NO KEY UPDATE");
        let thread = sqlx::query_as::<_, ThreadModel>(&lock_sql)
            .bind(draft.thread_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .map(Thread::from)
            .ok_or_else(|| thread_not_found(draft.thread_id))?;

        thread.ensure_accepts_replies(actor)?;

        let placement = match draft.parent_id {
            None => ReplyPlacement::root(draft.id),
            Some(parent_id) => {
                // soft-deleted parents are valid anchors
                let parent_sql =
                    format!("SELECT {REPLY_COLUMNS} FROM forum_replies WHERE id = $1 AND thread_id = $2");
                let parent = sqlx::query_as::<_, ReplyModel>(&parent_sql)
                    .bind(parent_id.into_inner())
                    .bind(draft.thread_id.into_inner())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(map_db_error)?
                    .map(Reply::from)
                    .ok_or(DomainError::ParentReplyNotFound(parent_id))?;

                parent.place_child(draft.id)?
            }
        };
        debug!(depth = placement.depth, path = %placement.path, "Allocated reply path");

        let reply = draft.clone().place(placement);
        let row = ReplyInsert::new(&reply);

        sqlx::query(
            r"
            INSERT INTO forum_replies
                (id, thread_id, parent_reply_id, author_id, content, depth, path, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ",
        )
        .bind(row.id)
        .bind(row.thread_id)
        .bind(row.parent_reply_id)
        .bind(row.author_id)
        .bind(row.content)
        .bind(row.depth)
        .bind(row.path)
        .bind(row.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            UPDATE forum_threads
            SET reply_count = reply_count + 1, last_activity_at = $2
            WHERE id = $1
            ",
        )
        .bind(row.thread_id)
        .bind(row.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(reply)
    }

    #[instrument(skip(self, content))]
    async fn update_content(&self, id: ReplyId, content: &str) -> RepoResult<Reply> {
        let sql = format!(
            "UPDATE forum_replies SET content = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {REPLY_COLUMNS}"
        );
        let result = sqlx::query_as::<_, ReplyModel>(&sql)
            .bind(id.into_inner())
            .bind(content)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Reply::from).ok_or_else(|| reply_not_found(id))
    }

    #[instrument(skip(self))]
    async fn soft_delete(&self, id: ReplyId, by: UserId) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let thread_id = sqlx::query_scalar::<_, Uuid>(
            r"
            UPDATE forum_replies
            SET deleted_at = NOW(), deleted_by = $2, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING thread_id
            ",
        )
        .bind(id.into_inner())
        .bind(by.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| reply_not_found(id))?;

        sqlx::query(
            r"
            UPDATE forum_threads
            SET reply_count = GREATEST(reply_count - 1, 0)
            WHERE id = $1
            ",
        )
        .bind(thread_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
