//! Thread database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the forum_threads table
#[derive(Debug, Clone, FromRow)]
pub struct ThreadModel {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub topic_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub view_count: i64,
    pub reply_count: i64,
    pub locked: bool,
    pub locked_at: Option<DateTime<Utc>>,
    pub pinned: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl ThreadModel {
    /// Check if thread is soft deleted
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

