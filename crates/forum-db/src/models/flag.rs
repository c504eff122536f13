//! Content flag database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the content_flags table
#[derive(Debug, Clone, FromRow)]
pub struct ContentFlagModel {
    pub id: Uuid,
    pub target_type: String,
    pub target_id: Uuid,
    pub reporter_id: Uuid,
    pub reason: String,
    pub details: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// A queue row: the flag plus columns joined from its target
#[derive(Debug, Clone, FromRow)]
pub struct FlaggedContentModel {
    #[sqlx(flatten)]
    pub flag: ContentFlagModel,
    pub title: Option<String>,
    pub content: Option<String>,
    pub flag_count: i64,
}
