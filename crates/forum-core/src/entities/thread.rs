//! Thread entity - a discussion thread owning a tree of replies

use chrono::{DateTime, Utc};

use super::check_char_length;
use crate::error::DomainError;
use crate::value_objects::{Actor, Deletion, ThreadId, TopicId, UserId};

pub const TITLE_MIN_LENGTH: usize = 3;
pub const TITLE_MAX_LENGTH: usize = 200;
pub const THREAD_CONTENT_MIN_LENGTH: usize = 10;
pub const THREAD_CONTENT_MAX_LENGTH: usize = 5000;
pub const MAX_TAGS: usize = 5;
pub const TAG_MAX_LENGTH: usize = 50;

/// Thread entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub id: ThreadId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub topic_id: Option<TopicId>,
    pub tags: Vec<String>,
    pub view_count: i64,
    pub reply_count: i64,
    pub locked: bool,
    pub locked_at: Option<DateTime<Utc>>,
    pub pinned: bool,
    pub deletion: Deletion,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

/// Unvalidated input for a new thread
#[derive(Debug, Clone, Default)]
pub struct ThreadDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub topic_id: Option<TopicId>,
}

impl ThreadDraft {
    /// Check length bounds and normalize the tag set
    pub fn validate(self) -> Result<Self, DomainError> {
        let title = self.title.trim().to_string();
        check_char_length("title", &title, TITLE_MIN_LENGTH, TITLE_MAX_LENGTH)?;
        check_char_length(
            "content",
            self.content.trim(),
            THREAD_CONTENT_MIN_LENGTH,
            THREAD_CONTENT_MAX_LENGTH,
        )?;
        let tags = normalize_tags(self.tags)?;

        Ok(Self {
            title,
            content: self.content,
            tags,
            topic_id: self.topic_id,
        })
    }
}

/// Trim tags, drop empty ones and duplicates, then enforce the count and
/// length limits. First occurrence wins, so order is otherwise preserved.
pub fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>, DomainError> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() || normalized.iter().any(|t| t == tag) {
            continue;
        }
        if tag.chars().count() > TAG_MAX_LENGTH {
            return Err(DomainError::validation(
                "tags",
                format!("each tag must be at most {TAG_MAX_LENGTH} characters"),
            ));
        }
        normalized.push(tag.to_string());
    }

    if normalized.len() > MAX_TAGS {
        return Err(DomainError::validation(
            "tags",
            format!("at most {MAX_TAGS} tags are allowed"),
        ));
    }

    Ok(normalized)
}

impl Thread {
    /// Create a new thread from a draft, validating it first
    pub fn create(author_id: UserId, draft: ThreadDraft) -> Result<Self, DomainError> {
        let draft = draft.validate()?;
        let now = Utc::now();

        Ok(Self {
            id: ThreadId::generate(),
            author_id,
            title: draft.title,
            content: draft.content,
            topic_id: draft.topic_id,
            tags: draft.tags,
            view_count: 0,
            reply_count: 0,
            locked: false,
            locked_at: None,
            pinned: false,
            deletion: Deletion::Live,
            created_at: now,
            updated_at: now,
            last_activity_at: now,
        })
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deletion.is_deleted()
    }

    /// Check whether `actor` may add a reply right now.
    ///
    /// Deleted threads look absent. Locked threads only accept moderators.
    pub fn ensure_accepts_replies(&self, actor: &Actor) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::ThreadNotFound(self.id));
        }
        if self.locked && !actor.is_moderator {
            return Err(DomainError::ThreadLocked);
        }
        Ok(())
    }

    /// Set the lock flag. `locked_at` survives a re-lock and is cleared on unlock.
    pub fn set_locked(&mut self, locked: bool) {
        match (self.locked, locked) {
            (false, true) => self.locked_at = Some(Utc::now()),
            (_, false) => self.locked_at = None,
            (true, true) => {}
        }
        self.locked = locked;
        self.updated_at = Utc::now();
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
        self.updated_at = Utc::now();
    }

    pub fn mark_deleted(&mut self, by: UserId) {
        self.deletion = Deletion::now(by);
        self.updated_at = Utc::now();
    }
}
