//! Reply entity - a node in a thread's reply tree

use chrono::{DateTime, Utc};

use super::check_char_length;
use crate::error::DomainError;
use crate::value_objects::{Actor, Deletion, ReplyId, ReplyPath, ReplyPlacement, ThreadId, UserId};

pub const REPLY_CONTENT_MIN_LENGTH: usize = 1;
pub const REPLY_CONTENT_MAX_LENGTH: usize = 3000;

/// Reply entity.
///
/// `path`, `depth`, `parent_id` and `thread_id` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub id: ReplyId,
    pub thread_id: ThreadId,
    pub parent_id: Option<ReplyId>,
    pub author_id: UserId,
    pub content: String,
    pub depth: i32,
    pub path: ReplyPath,
    pub deletion: Deletion,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated reply that has its id but no position yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyDraft {
    pub id: ReplyId,
    pub thread_id: ThreadId,
    pub parent_id: Option<ReplyId>,
    pub author_id: UserId,
    pub content: String,
}

/// Check reply body length bounds
pub fn validate_reply_content(content: &str) -> Result<(), DomainError> {
    check_char_length(
        "content",
        content.trim(),
        REPLY_CONTENT_MIN_LENGTH,
        REPLY_CONTENT_MAX_LENGTH,
    )
}

impl ReplyDraft {
    /// Validate the body and mint the reply id. The id is needed before
    /// insertion because it becomes the reply's own path segment.
    pub fn new(
        thread_id: ThreadId,
        author_id: UserId,
        parent_id: Option<ReplyId>,
        content: String,
    ) -> Result<Self, DomainError> {
        validate_reply_content(&content)?;
        Ok(Self {
            id: ReplyId::generate(),
            thread_id,
            parent_id,
            author_id,
            content,
        })
    }

    /// Place the draft in the tree
    pub fn place(self, placement: ReplyPlacement) -> Reply {
        let now = Utc::now();
        Reply {
            id: self.id,
            thread_id: self.thread_id,
            parent_id: self.parent_id,
            author_id: self.author_id,
            content: self.content,
            depth: placement.depth,
            path: placement.path,
            deletion: Deletion::Live,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Reply {
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deletion.is_deleted()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Only the author may edit or delete, and only while the reply is live
    pub fn ensure_modifiable_by(&self, actor: &Actor) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::ReplyNotFound(self.id));
        }
        if self.author_id != actor.user_id {
            return Err(DomainError::NotReplyAuthor);
        }
        Ok(())
    }

    /// Placement of a new reply under this one
    pub fn place_child(&self, child: ReplyId) -> Result<ReplyPlacement, DomainError> {
        ReplyPlacement::under(&self.path, self.depth, child)
    }

    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}
