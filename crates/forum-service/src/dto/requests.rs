//! Request DTOs for API endpoints
//!
//! Body DTOs implement `Deserialize` and `Validate`; the same bounds are
//! enforced again by the domain layer. Query parameters arrive already
//! parsed into the `*Params` types.

use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use forum_core::entities::{
    normalize_tags, ActionType, FlagStatus, TargetKind, MAX_BAN_DAYS, MAX_FLAG_DETAILS_LENGTH,
    MAX_REASON_LENGTH, REPLY_CONTENT_MAX_LENGTH, REPLY_CONTENT_MIN_LENGTH,
    THREAD_CONTENT_MAX_LENGTH, THREAD_CONTENT_MIN_LENGTH, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH,
};
use forum_core::value_objects::{ThreadSort, TopicId};

/// Default page size for thread listings
pub const DEFAULT_THREADS_PER_PAGE: u32 = 20;
/// Default page size for the admin listings (moderation log, bans, flag queue)
pub const DEFAULT_ADMIN_PER_PAGE: u32 = 50;
/// Largest page any listing will return
pub const MAX_PER_PAGE: u32 = 100;

// Length bounds in the integer type the validator derive expects
const TITLE_MIN: u64 = TITLE_MIN_LENGTH as u64;
const TITLE_MAX: u64 = TITLE_MAX_LENGTH as u64;
const THREAD_CONTENT_MIN: u64 = THREAD_CONTENT_MIN_LENGTH as u64;
const THREAD_CONTENT_MAX: u64 = THREAD_CONTENT_MAX_LENGTH as u64;
const REPLY_CONTENT_MIN: u64 = REPLY_CONTENT_MIN_LENGTH as u64;
const REPLY_CONTENT_MAX: u64 = REPLY_CONTENT_MAX_LENGTH as u64;
const REASON_MAX: u64 = MAX_REASON_LENGTH as u64;
const FLAG_DETAILS_MAX: u64 = MAX_FLAG_DETAILS_LENGTH as u64;

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    normalize_tags(tags.to_vec()).map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new("tags");
        err.message = Some(e.to_string().into());
        err
    })
}

// ============================================================================
// Thread Requests
// ============================================================================

/// Create thread request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateThreadRequest {
    #[validate(length(
        min = TITLE_MIN,
        max = TITLE_MAX,
        message = "Title must be 3-200 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = THREAD_CONTENT_MIN,
        max = THREAD_CONTENT_MAX,
        message = "Content must be 10-5000 characters"
    ))]
    pub content: String,

    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,

    pub topic_id: Option<Uuid>,
}

// ============================================================================
// Reply Requests
// ============================================================================

/// Create reply request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReplyRequest {
    #[validate(length(
        min = REPLY_CONTENT_MIN,
        max = REPLY_CONTENT_MAX,
        message = "Content must be 1-3000 characters"
    ))]
    pub content: String,

    /// Reply to answer; omitted for a top-level reply
    pub parent_reply_id: Option<Uuid>,
}

/// Update reply request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateReplyRequest {
    #[validate(length(
        min = REPLY_CONTENT_MIN,
        max = REPLY_CONTENT_MAX,
        message = "Content must be 1-3000 characters"
    ))]
    pub content: String,
}

// ============================================================================
// Moderation Requests
// ============================================================================

/// Lock or unlock a thread
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LockThreadRequest {
    pub locked: bool,

    #[validate(length(max = REASON_MAX, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// Pin or unpin a thread
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PinThreadRequest {
    pub pinned: bool,

    #[validate(length(max = REASON_MAX, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

/// Soft delete a thread
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteThreadRequest {
    #[validate(length(min = 1, max = REASON_MAX, message = "Reason must be 1-500 characters"))]
    pub reason: String,
}

/// Ban a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BanUserRequest {
    #[validate(length(min = 1, max = REASON_MAX, message = "Reason must be 1-500 characters"))]
    pub reason: String,

    /// Ban length in days; 0 bans permanently
    #[serde(default)]
    #[validate(range(max = MAX_BAN_DAYS, message = "Duration must be 0-36500 days"))]
    pub duration_days: u32,
}

/// Lift a user's active ban
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UnbanUserRequest {
    #[validate(length(max = REASON_MAX, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

// ============================================================================
// Flag Requests
// ============================================================================

/// Flag a thread or reply for moderator review
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FlagContentRequest {
    /// `thread` or `reply`
    pub target_type: TargetKind,

    pub target_id: Uuid,

    #[validate(length(min = 1, max = REASON_MAX, message = "Reason must be 1-500 characters"))]
    pub reason: String,

    #[validate(length(max = FLAG_DETAILS_MAX, message = "Details must be at most 1000 characters"))]
    pub details: Option<String>,
}

/// Close a pending flag as `reviewed` or `dismissed`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResolveFlagRequest {
    pub status: FlagStatus,
}

// ============================================================================
// Listing Parameters
// ============================================================================

/// One-based page selection, already clamped to valid bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    /// Clamp raw values: `page` to at least 1, `per_page` to 1..=100
    pub fn new(page: Option<u32>, per_page: Option<u32>, default_per_page: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(default_per_page).clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None, DEFAULT_THREADS_PER_PAGE)
    }
}

/// Thread listing filters
#[derive(Debug, Clone, Default)]
pub struct ListThreadsParams {
    pub sort: ThreadSort,
    pub topic_id: Option<TopicId>,
    pub search: Option<String>,
    pub page: PageRequest,
}

/// Moderation log filters
#[derive(Debug, Clone)]
pub struct ModerationLogParams {
    pub action: Option<ActionType>,
    pub target_type: Option<TargetKind>,
    pub page: PageRequest,
}

/// Ban list filters
#[derive(Debug, Clone)]
pub struct ListBansParams {
    pub active_only: bool,
    pub page: PageRequest,
}

/// Flag queue filters
#[derive(Debug, Clone)]
pub struct FlagQueueParams {
    pub status: FlagStatus,
    pub page: PageRequest,
}
