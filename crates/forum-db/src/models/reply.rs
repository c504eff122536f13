//! Reply database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the forum_replies table
#[derive(Debug, Clone, FromRow)]
pub struct ReplyModel {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub parent_reply_id: Option<Uuid>,
    pub author_id: Uuid,
    pub content: String,
    pub depth: i32,
    pub path: String,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
