//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method that writes more than one row
//! runs in a single transaction in the implementation.

use async_trait::async_trait;

use crate::entities::{
    ActionType, ContentFlag, FlagStatus, FlaggedContent, ModerationAction, Reply, ReplyDraft,
    TargetKind, Thread, UserBan,
};
use crate::error::DomainError;
use crate::value_objects::{Actor, FlagId, ReplyId, ThreadId, ThreadSort, TopicId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Thread Repository
// ============================================================================

/// Filters and paging for thread listings
#[derive(Debug, Clone, Default)]
pub struct ThreadQuery {
    pub sort: ThreadSort,
    pub topic_id: Option<TopicId>,
    /// Free-text query handed to the text-search index
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Find a live (not soft-deleted) thread by ID
    async fn find_by_id(&self, id: ThreadId) -> RepoResult<Option<Thread>>;

    /// List live threads, pinned first, then by the requested sort
    async fn list(&self, query: &ThreadQuery) -> RepoResult<Vec<Thread>>;

    /// Count live threads matching the query filters
    async fn count(&self, query: &ThreadQuery) -> RepoResult<i64>;

    /// Create a new thread
    async fn create(&self, thread: &Thread) -> RepoResult<()>;

    /// Atomically add one to the view counter
    async fn increment_view_count(&self, id: ThreadId) -> RepoResult<()>;
}

// ============================================================================
// Reply Repository
// ============================================================================

#[async_trait]
pub trait ReplyRepository: Send + Sync {
    /// Find a reply by ID, soft-deleted or not
    async fn find_by_id(&self, id: ReplyId) -> RepoResult<Option<Reply>>;

    /// Every reply of a thread, soft-deleted included, ordered by path
    async fn find_by_thread(&self, thread_id: ThreadId) -> RepoResult<Vec<Reply>>;

    /// Live direct children of a reply, ordered by path
    async fn find_children(&self, parent_id: ReplyId) -> RepoResult<Vec<Reply>>;

    /// Insert a reply in one transaction.
    ///
    /// Re-reads the thread under a row lock and checks it accepts replies from
    /// `actor`, resolves the parent inside the same thread, allocates the
    /// path, inserts, and bumps the thread's reply count and last activity.
    async fn create(&self, draft: &ReplyDraft, actor: &Actor) -> RepoResult<Reply>;

    /// Replace the body of a live reply
    async fn update_content(&self, id: ReplyId, content: &str) -> RepoResult<Reply>;

    /// Soft delete a live reply and decrement the thread's reply count
    async fn soft_delete(&self, id: ReplyId, by: UserId) -> RepoResult<()>;
}

// ============================================================================
// Moderation Repository
// ============================================================================

/// Filters and paging for the moderation log
#[derive(Debug, Clone, Default)]
pub struct ModerationQuery {
    pub action: Option<ActionType>,
    pub target_type: Option<TargetKind>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait ModerationRepository: Send + Sync {
    /// Apply a thread transition (lock, unlock, pin, unpin, delete) and append
    /// the action to the log in the same transaction. Returns the updated thread.
    async fn apply_thread_action(&self, action: &ModerationAction) -> RepoResult<Thread>;

    /// Read the log, newest first
    async fn list_actions(&self, query: &ModerationQuery) -> RepoResult<Vec<ModerationAction>>;
}

// ============================================================================
// Ban Repository
// ============================================================================

/// Filters and paging for ban listings
#[derive(Debug, Clone, Default)]
pub struct BanQuery {
    pub active_only: bool,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait BanRepository: Send + Sync {
    /// The ban currently in force for a user, if any
    async fn find_active_ban(&self, user_id: UserId) -> RepoResult<Option<UserBan>>;

    /// Record a ban, set the user's banned flag and append the action, in one
    /// transaction. Fails if the user is unknown or already actively banned.
    async fn ban_user(&self, ban: &UserBan, action: &ModerationAction) -> RepoResult<()>;

    /// Deactivate the user's active ban, clear the banned flag and append the
    /// action, in one transaction. Returns the deactivated ban.
    async fn unban_user(&self, user_id: UserId, action: &ModerationAction) -> RepoResult<UserBan>;

    /// List bans, newest first
    async fn list_bans(&self, query: &BanQuery) -> RepoResult<Vec<UserBan>>;
}

// ============================================================================
// Flag Repository
// ============================================================================

/// Filters and paging for the flag review queue
#[derive(Debug, Clone, Default)]
pub struct FlagQuery {
    pub status: FlagStatus,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait FlagRepository: Send + Sync {
    /// Store a pending flag. Fails if the target is missing or deleted, or if
    /// the reporter already has a pending flag on it.
    async fn create_flag(&self, flag: &ContentFlag) -> RepoResult<()>;

    async fn find_by_id(&self, id: FlagId) -> RepoResult<Option<ContentFlag>>;

    /// Move a pending flag to `status`. Fails if it is already resolved.
    async fn resolve_flag(
        &self,
        id: FlagId,
        status: FlagStatus,
        moderator_id: UserId,
    ) -> RepoResult<ContentFlag>;

    /// Flags in one status joined with their targets, newest first
    async fn list_flags(&self, query: &FlagQuery) -> RepoResult<Vec<FlaggedContent>>;
}
