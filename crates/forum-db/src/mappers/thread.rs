//! Thread entity <-> model mapper

use chrono::{DateTime, Utc};
use uuid::Uuid;

use forum_core::entities::Thread;
use forum_core::value_objects::{Deletion, ThreadId, TopicId, UserId};

use crate::models::ThreadModel;

/// Convert ThreadModel to Thread entity
impl From<ThreadModel> for Thread {
    fn from(model: ThreadModel) -> Self {
        Thread {
            id: ThreadId::from_uuid(model.id),
            author_id: UserId::from_uuid(model.author_id),
            title: model.title,
            content: model.content,
            topic_id: model.topic_id.map(TopicId::from_uuid),
            tags: model.tags,
            view_count: model.view_count,
            reply_count: model.reply_count,
            locked: model.locked,
            locked_at: model.locked_at,
            pinned: model.pinned,
            deletion: Deletion::from_columns(model.deleted_at, model.deleted_by.map(UserId::from_uuid)),
            created_at: model.created_at,
            updated_at: model.updated_at,
            last_activity_at: model.last_activity_at,
        }
    }
}

/// Thread entity values for database insertion
pub struct ThreadInsert<'a> {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: &'a str,
    pub content: &'a str,
    pub topic_id: Option<Uuid>,
    pub tags: &'a [String],
    pub created_at: DateTime<Utc>,
}

impl<'a> ThreadInsert<'a> {
    pub fn new(thread: &'a Thread) -> Self {
        Self {
            id: thread.id.into_inner(),
            author_id: thread.author_id.into_inner(),
            title: &thread.title,
            content: &thread.content,
            topic_id: thread.topic_id.map(TopicId::into_inner),
            tags: &thread.tags,
            created_at: thread.created_at,
        }
    }
}
