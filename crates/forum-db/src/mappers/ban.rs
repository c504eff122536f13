//! User ban entity <-> model mapper

use chrono::{DateTime, Utc};
use uuid::Uuid;

use forum_core::entities::UserBan;
use forum_core::value_objects::{BanId, UserId};

use crate::models::UserBanModel;

/// Convert UserBanModel to UserBan entity
impl From<UserBanModel> for UserBan {
    fn from(model: UserBanModel) -> Self {
        UserBan {
            id: BanId::from_uuid(model.id),
            user_id: UserId::from_uuid(model.user_id),
            moderator_id: UserId::from_uuid(model.moderator_id),
            reason: model.reason,
            expires_at: model.expires_at,
            active: model.active,
            created_at: model.created_at,
        }
    }
}

/// User ban values for database insertion
pub struct UserBanInsert<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub moderator_id: Uuid,
    pub reason: &'a str,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl<'a> UserBanInsert<'a> {
    pub fn new(ban: &'a UserBan) -> Self {
        Self {
            id: ban.id.into_inner(),
            user_id: ban.user_id.into_inner(),
            moderator_id: ban.moderator_id.into_inner(),
            reason: &ban.reason,
            expires_at: ban.expires_at,
            created_at: ban.created_at,
        }
    }
}
