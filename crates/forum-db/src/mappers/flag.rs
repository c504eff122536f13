//! Content flag entity <-> model mapper

use chrono::{DateTime, Utc};
use uuid::Uuid;

use forum_core::entities::{ContentFlag, FlaggedContent};
use forum_core::error::DomainError;
use forum_core::value_objects::{FlagId, UserId};

use crate::models::{ContentFlagModel, FlaggedContentModel};

/// Convert ContentFlagModel to ContentFlag entity.
///
/// Fails if a stored kind or status is not one the domain knows.
impl TryFrom<ContentFlagModel> for ContentFlag {
    type Error = DomainError;

    fn try_from(model: ContentFlagModel) -> Result<Self, Self::Error> {
        Ok(ContentFlag {
            id: FlagId::from_uuid(model.id),
            target_type: model.target_type.parse().map_err(DomainError::InternalError)?,
            target_id: model.target_id,
            reporter_id: UserId::from_uuid(model.reporter_id),
            reason: model.reason,
            details: model.details,
            status: model.status.parse().map_err(DomainError::InternalError)?,
            created_at: model.created_at,
            reviewed_by: model.reviewed_by.map(UserId::from_uuid),
            reviewed_at: model.reviewed_at,
        })
    }
}

impl TryFrom<FlaggedContentModel> for FlaggedContent {
    type Error = DomainError;

    fn try_from(model: FlaggedContentModel) -> Result<Self, Self::Error> {
        Ok(FlaggedContent {
            flag: ContentFlag::try_from(model.flag)?,
            title: model.title,
            content: model.content,
            flag_count: model.flag_count,
        })
    }
}

/// Content flag values for database insertion
pub struct ContentFlagInsert<'a> {
    pub id: Uuid,
    pub target_type: &'static str,
    pub target_id: Uuid,
    pub reporter_id: Uuid,
    pub reason: &'a str,
    pub details: Option<&'a str>,
    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}

impl<'a> ContentFlagInsert<'a> {
    pub fn new(flag: &'a ContentFlag) -> Self {
        Self {
            id: flag.id.into_inner(),
            target_type: flag.target_type.as_str(),
            target_id: flag.target_id,
            reporter_id: flag.reporter_id.into_inner(),
            reason: &flag.reason,
            details: flag.details.as_deref(),
            status: flag.status.as_str(),
            created_at: flag.created_at,
        }
    }
}
