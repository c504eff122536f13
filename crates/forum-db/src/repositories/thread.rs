//! PostgreSQL implementation of ThreadRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::Thread;
use forum_core::traits::{RepoResult, ThreadQuery, ThreadRepository};
use forum_core::value_objects::{ThreadId, ThreadSort, TopicId};

use crate::mappers::ThreadInsert;
use crate::models::ThreadModel;

use super::error::{map_db_error, page_bounds, thread_not_found};

/// Column list matching [`ThreadModel`]
pub(crate) const THREAD_COLUMNS: &str = "id, author_id, title, content, topic_id, tags, \
    view_count, reply_count, locked, locked_at, pinned, deleted_at, deleted_by, created_at, \
    updated_at, last_activity_at";

/// Pinned threads first, then the requested order. `id` breaks ties so pages are stable.
fn order_clause(sort: ThreadSort) -> &'static str {
    match sort {
        ThreadSort::Recent => "pinned DESC, last_activity_at DESC, id DESC",
        ThreadSort::Popular => "pinned DESC, view_count DESC, last_activity_at DESC, id DESC",
        ThreadSort::MostReplies => "pinned DESC, reply_count DESC, last_activity_at DESC, id DESC",
    }
}

/// Filter shared by listing and counting; `$1` topic, `$2` search text
const LIST_FILTER: &str = "deleted_at IS NULL \
    AND ($1::uuid IS NULL OR topic_id = $1) \
    AND ($2::text IS NULL OR search_vector @@ plainto_tsquery('english', $2))";

/// PostgreSQL implementation of ThreadRepository
#[derive(Clone)]
pub struct PgThreadRepository {
    pool: PgPool,
}

impl PgThreadRepository {
    /// Create a new PgThreadRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreadRepository for PgThreadRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ThreadId) -> RepoResult<Option<Thread>> {
        let sql = format!("SELECT {THREAD_COLUMNS} FROM forum_threads WHERE id = $1 AND deleted_at IS NULL");
        let result = sqlx::query_as::<_, ThreadModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Thread::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ThreadQuery) -> RepoResult<Vec<Thread>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);
        let sql = format!(
            "SELECT {THREAD_COLUMNS} FROM forum_threads WHERE {LIST_FILTER} ORDER BY {} LIMIT $3 OFFSET $4",
            order_clause(query.sort)
        );

        let results = sqlx::query_as::<_, ThreadModel>(&sql)
            .bind(query.topic_id.map(TopicId::into_inner))
            .bind(query.search.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Thread::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self, query: &ThreadQuery) -> RepoResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM forum_threads WHERE {LIST_FILTER}");

        sqlx::query_scalar::<_, i64>(&sql)
            .bind(query.topic_id.map(TopicId::into_inner))
            .bind(query.search.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, thread), fields(thread_id = %thread.id))]
    async fn create(&self, thread: &Thread) -> RepoResult<()> {
        let row = ThreadInsert::new(thread);

        sqlx::query(
            r"
            INSERT INTO forum_threads
                (id, author_id, title, content, topic_id, tags, created_at, updated_at, last_activity_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $7)
            ",
        )
        .bind(row.id)
        .bind(row.author_id)
        .bind(row.title)
        .bind(row.content)
        .bind(row.topic_id)
        .bind(row.tags)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_view_count(&self, id: ThreadId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE forum_threads
            SET view_count = view_count + 1
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(thread_not_found(id));
        }

        Ok(())
    }
}
