//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Ids serialize as hyphenated UUID strings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use forum_core::entities::{FlagStatus, ModerationDetail, TargetKind};
use forum_core::value_objects::{ActionId, BanId, FlagId, ReplyId, ThreadId, TopicId, UserId};
use uuid::Uuid;

// ============================================================================
// Common Response Types
// ============================================================================

/// Page of results with its paging metadata
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    /// Page with a known total; `has_more` is derived from it
    pub fn with_total(data: Vec<T>, page: u32, per_page: u32, total: i64) -> Self {
        let seen = i64::from(page.saturating_sub(1)) * i64::from(per_page) + data.len() as i64;
        Self {
            pagination: PaginationMeta {
                page,
                per_page,
                total: Some(total),
                has_more: seen < total,
            },
            data,
        }
    }

    /// Page without a total; a full page means another one may follow
    pub fn without_total(data: Vec<T>, page: u32, per_page: u32) -> Self {
        Self {
            pagination: PaginationMeta {
                page,
                per_page,
                total: None,
                has_more: data.len() == per_page as usize,
            },
            data,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    pub has_more: bool,
}

// ============================================================================
// Thread Responses
// ============================================================================

/// Thread response
#[derive(Debug, Clone, Serialize)]
pub struct ThreadResponse {
    pub id: ThreadId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub topic_id: Option<TopicId>,
    pub tags: Vec<String>,
    pub view_count: i64,
    pub reply_count: i64,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_at: Option<DateTime<Utc>>,
    pub pinned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

/// Thread with its reconstructed reply forest
#[derive(Debug, Clone, Serialize)]
pub struct ThreadDetailResponse {
    pub thread: ThreadResponse,
    pub replies: Vec<ReplyNodeResponse>,
}

// ============================================================================
// Reply Responses
// ============================================================================

/// Reply as returned by create and update
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub id: ReplyId,
    pub thread_id: ThreadId,
    pub parent_reply_id: Option<ReplyId>,
    pub author_id: UserId,
    pub content: String,
    pub depth: i32,
    pub path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One node of the reply tree.
///
/// Placeholders (deleted replies kept for their descendants) carry
/// `deleted: true` with `author_id` and `content` set to null.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyNodeResponse {
    pub id: ReplyId,
    pub thread_id: ThreadId,
    pub parent_reply_id: Option<ReplyId>,
    pub author_id: Option<UserId>,
    pub content: Option<String>,
    pub depth: i32,
    pub path: String,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub replies: Vec<ReplyNodeResponse>,
}

// ============================================================================
// Moderation Responses
// ============================================================================

/// Moderation log entry; the detail fields are inlined next to `action_type`
#[derive(Debug, Clone, Serialize)]
pub struct ModerationActionResponse {
    pub id: ActionId,
    pub moderator_id: UserId,
    pub target_type: TargetKind,
    pub target_id: Uuid,
    #[serde(flatten)]
    pub detail: ModerationDetail,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a thread moderation transition
#[derive(Debug, Clone, Serialize)]
pub struct ThreadModerationResponse {
    pub thread_id: ThreadId,
    pub locked: bool,
    pub pinned: bool,
    pub deleted: bool,
    pub action: ModerationActionResponse,
}

/// User ban response
#[derive(Debug, Clone, Serialize)]
pub struct BanResponse {
    pub id: BanId,
    pub user_id: UserId,
    pub moderator_id: UserId,
    pub reason: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub permanent: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Result of a ban or unban
#[derive(Debug, Clone, Serialize)]
pub struct BanModerationResponse {
    pub ban: BanResponse,
    pub action: ModerationActionResponse,
}

// ============================================================================
// Flag Responses
// ============================================================================

/// Content flag
#[derive(Debug, Clone, Serialize)]
pub struct FlagResponse {
    pub id: FlagId,
    pub target_type: TargetKind,
    pub target_id: Uuid,
    pub reporter_id: UserId,
    pub reason: String,
    pub details: Option<String>,
    pub status: FlagStatus,
    pub created_at: DateTime<Utc>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Review queue entry: the flag plus a snapshot of its target.
/// `content` is null when the target has since been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct FlaggedContentResponse {
    #[serde(flatten)]
    pub flag: FlagResponse,
    pub title: Option<String>,
    pub content: Option<String>,
    pub flag_count: i64,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status per dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
