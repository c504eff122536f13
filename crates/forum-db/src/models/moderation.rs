//! Moderation log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the moderation_actions table
#[derive(Debug, Clone, FromRow)]
pub struct ModerationActionModel {
    pub id: Uuid,
    pub moderator_id: Uuid,
    pub action_type: String,
    pub target_type: String,
    pub target_id: Uuid,
    pub reason: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
