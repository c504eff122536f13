//! PostgreSQL implementation of BanRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use forum_core::entities::{ModerationAction, UserBan};
use forum_core::error::DomainError;
use forum_core::traits::{BanQuery, BanRepository, RepoResult};
use forum_core::value_objects::UserId;

use crate::mappers::UserBanInsert;
use crate::models::UserBanModel;

use super::error::{map_db_error, page_bounds, user_not_found};
use super::moderation::append_action;

/// PostgreSQL implementation of BanRepository
#[derive(Clone)]
pub struct PgBanRepository {
    pool: PgPool,
}

impl PgBanRepository {
    /// Create a new PgBanRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BanRepository for PgBanRepository {
    #[instrument(skip(self))]
    async fn find_active_ban(&self, user_id: UserId) -> RepoResult<Option<UserBan>> {
        let result = sqlx::query_as::<_, UserBanModel>(
            r"
            SELECT id, user_id, moderator_id, reason, expires_at, active, created_at
            FROM user_bans
            WHERE user_id = $1 AND active AND (expires_at IS NULL OR expires_at > NOW())
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(UserBan::from))
    }

    #[instrument(skip(self, ban, action), fields(ban_id = %ban.id, user_id = %ban.user_id))]
    async fn ban_user(&self, ban: &UserBan, action: &ModerationAction) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // serializes concurrent bans of the same user
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(ban.user_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| user_not_found(ban.user_id))?;

        let already_banned = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM user_bans
                WHERE user_id = $1 AND active AND (expires_at IS NULL OR expires_at > NOW())
            )
            ",
        )
        .bind(ban.user_id.into_inner())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if already_banned {
            return Err(DomainError::AlreadyBanned);
        }

        let row = UserBanInsert::new(ban);
        sqlx::query(
            r"
            INSERT INTO user_bans (id, user_id, moderator_id, reason, expires_at, active, created_at)
            VALUES ($1, $2, $3, $4, $5, TRUE, $6)
            ",
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.moderator_id)
        .bind(row.reason)
        .bind(row.expires_at)
        .bind(row.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query("UPDATE users SET is_banned = TRUE WHERE id = $1")
            .bind(row.user_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        append_action(&mut *tx, action).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, action), fields(action_id = %action.id))]
    async fn unban_user(&self, user_id: UserId, action: &ModerationAction) -> RepoResult<UserBan> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id.into_inner())
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| user_not_found(user_id))?;

        let ban = sqlx::query_as::<_, UserBanModel>(
            r"
            UPDATE user_bans
            SET active = FALSE
            WHERE id = (
                SELECT id FROM user_bans
                WHERE user_id = $1 AND active AND (expires_at IS NULL OR expires_at > NOW())
                ORDER BY created_at DESC
                LIMIT 1
            )
            RETURNING id, user_id, moderator_id, reason, expires_at, active, created_at
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .map(UserBan::from)
        .ok_or(DomainError::NotBanned)?;

        sqlx::query("UPDATE users SET is_banned = FALSE WHERE id = $1")
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        append_action(&mut *tx, action).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(ban)
    }

    #[instrument(skip(self))]
    async fn list_bans(&self, query: &BanQuery) -> RepoResult<Vec<UserBan>> {
        let (limit, offset) = page_bounds(query.limit, query.offset);

        let results = sqlx::query_as::<_, UserBanModel>(
            r"
            SELECT id, user_id, moderator_id, reason, expires_at, active, created_at
            FROM user_bans
            WHERE NOT $1 OR (active AND (expires_at IS NULL OR expires_at > NOW()))
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(query.active_only)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(UserBan::from).collect())
    }
}
