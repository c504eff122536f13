//! User ban database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the user_bans table
#[derive(Debug, Clone, FromRow)]
pub struct UserBanModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub moderator_id: Uuid,
    pub reason: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}
