//! Reply entity <-> model mapper

use chrono::{DateTime, Utc};
use uuid::Uuid;

use forum_core::entities::Reply;
use forum_core::value_objects::{Deletion, ReplyId, ReplyPath, ThreadId, UserId};

use crate::models::ReplyModel;

/// Convert ReplyModel to Reply entity
impl From<ReplyModel> for Reply {
    fn from(model: ReplyModel) -> Self {
        Reply {
            id: ReplyId::from_uuid(model.id),
            thread_id: ThreadId::from_uuid(model.thread_id),
            parent_id: model.parent_reply_id.map(ReplyId::from_uuid),
            author_id: UserId::from_uuid(model.author_id),
            content: model.content,
            depth: model.depth,
            path: ReplyPath::from_stored(model.path),
            deletion: Deletion::from_columns(model.deleted_at, model.deleted_by.map(UserId::from_uuid)),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Reply entity values for database insertion
pub struct ReplyInsert<'a> {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub parent_reply_id: Option<Uuid>,
    pub author_id: Uuid,
    pub content: &'a str,
    pub depth: i32,
    pub path: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> ReplyInsert<'a> {
    pub fn new(reply: &'a Reply) -> Self {
        Self {
            id: reply.id.into_inner(),
            thread_id: reply.thread_id.into_inner(),
            parent_reply_id: reply.parent_id.map(ReplyId::into_inner),
            author_id: reply.author_id.into_inner(),
            content: &reply.content,
            depth: reply.depth,
            path: reply.path.as_str(),
            created_at: reply.created_at,
        }
    }
}
