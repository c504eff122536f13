//! Moderation action entity <-> model mapper
//!
//! The typed detail is flattened to `action_type`, `target_type`, `target_id`
//! and a `metadata` object on the way in, and rebuilt on the way out.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use forum_core::entities::{ModerationAction, ModerationDetail};
use forum_core::error::DomainError;
use forum_core::value_objects::{ActionId, UserId};

use crate::models::ModerationActionModel;

/// Convert ModerationActionModel to ModerationAction entity.
///
/// Fails if the stored kind or metadata no longer matches a known variant.
impl TryFrom<ModerationActionModel> for ModerationAction {
    type Error = DomainError;

    fn try_from(model: ModerationActionModel) -> Result<Self, Self::Error> {
        let detail = ModerationDetail::from_stored(&model.action_type, model.target_id, model.metadata)?;

        Ok(ModerationAction {
            id: ActionId::from_uuid(model.id),
            moderator_id: UserId::from_uuid(model.moderator_id),
            detail,
            reason: model.reason,
            created_at: model.created_at,
        })
    }
}

/// Moderation action values for database insertion
pub struct ModerationActionInsert<'a> {
    pub id: Uuid,
    pub moderator_id: Uuid,
    pub action_type: &'static str,
    pub target_type: &'static str,
    pub target_id: Uuid,
    pub reason: Option<&'a str>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl<'a> ModerationActionInsert<'a> {
    pub fn new(action: &'a ModerationAction) -> Self {
        let (target_kind, target_id) = action.detail.target();
        Self {
            id: action.id.into_inner(),
            moderator_id: action.moderator_id.into_inner(),
            action_type: action.action_type().as_str(),
            target_type: target_kind.as_str(),
            target_id,
            reason: action.reason.as_deref(),
            metadata: action.detail.metadata(),
            created_at: action.created_at,
        }
    }
}
