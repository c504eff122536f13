//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use forum_core::entities::{ContentFlag, FlaggedContent, ModerationAction, Reply, Thread, UserBan};
use forum_core::tree::ReplyNode;

use super::responses::{
    BanResponse, FlagResponse, FlaggedContentResponse, ModerationActionResponse, ReplyNodeResponse,
    ReplyResponse, ThreadResponse,
};

// ============================================================================
// Thread Mappers
// ============================================================================

impl From<&Thread> for ThreadResponse {
    fn from(thread: &Thread) -> Self {
        Self {
            id: thread.id,
            author_id: thread.author_id,
            title: thread.title.clone(),
            content: thread.content.clone(),
            topic_id: thread.topic_id,
            tags: thread.tags.clone(),
            view_count: thread.view_count,
            reply_count: thread.reply_count,
            locked: thread.locked,
            locked_at: thread.locked_at,
            pinned: thread.pinned,
            created_at: thread.created_at,
            updated_at: thread.updated_at,
            last_activity_at: thread.last_activity_at,
        }
    }
}

impl From<Thread> for ThreadResponse {
    fn from(thread: Thread) -> Self {
        Self::from(&thread)
    }
}

// ============================================================================
// Reply Mappers
// ============================================================================

impl From<Reply> for ReplyResponse {
    fn from(reply: Reply) -> Self {
        Self {
            id: reply.id,
            thread_id: reply.thread_id,
            parent_reply_id: reply.parent_id,
            author_id: reply.author_id,
            content: reply.content,
            depth: reply.depth,
            path: reply.path.into_inner(),
            created_at: reply.created_at,
            updated_at: reply.updated_at,
        }
    }
}

impl From<ReplyNode> for ReplyNodeResponse {
    fn from(node: ReplyNode) -> Self {
        let deleted = node.is_placeholder();
        let ReplyNode { reply, replies } = node;
        let (author_id, content) = if deleted {
            (None, None)
        } else {
            (Some(reply.author_id), Some(reply.content))
        };

        Self {
            id: reply.id,
            thread_id: reply.thread_id,
            parent_reply_id: reply.parent_id,
            author_id,
            content,
            depth: reply.depth,
            path: reply.path.into_inner(),
            deleted,
            created_at: reply.created_at,
            updated_at: reply.updated_at,
            replies: replies.into_iter().map(Self::from).collect(),
        }
    }
}

// ============================================================================
// Moderation Mappers
// ============================================================================

impl From<&ModerationAction> for ModerationActionResponse {
    fn from(action: &ModerationAction) -> Self {
        let (target_type, target_id) = action.detail.target();
        Self {
            id: action.id,
            moderator_id: action.moderator_id,
            target_type,
            target_id,
            detail: action.detail.clone(),
            reason: action.reason.clone(),
            created_at: action.created_at,
        }
    }
}

impl From<ModerationAction> for ModerationActionResponse {
    fn from(action: ModerationAction) -> Self {
        Self::from(&action)
    }
}

impl From<&UserBan> for BanResponse {
    fn from(ban: &UserBan) -> Self {
        Self {
            id: ban.id,
            user_id: ban.user_id,
            moderator_id: ban.moderator_id,
            reason: ban.reason.clone(),
            expires_at: ban.expires_at,
            permanent: ban.is_permanent(),
            active: ban.is_active(),
            created_at: ban.created_at,
        }
    }
}

impl From<UserBan> for BanResponse {
    fn from(ban: UserBan) -> Self {
        Self::from(&ban)
    }
}

// ============================================================================
// Flag Mappers
// ============================================================================

impl From<ContentFlag> for FlagResponse {
    fn from(flag: ContentFlag) -> Self {
        Self {
            id: flag.id,
            target_type: flag.target_type,
            target_id: flag.target_id,
            reporter_id: flag.reporter_id,
            reason: flag.reason,
            details: flag.details,
            status: flag.status,
            created_at: flag.created_at,
            reviewed_by: flag.reviewed_by,
            reviewed_at: flag.reviewed_at,
        }
    }
}

impl From<FlaggedContent> for FlaggedContentResponse {
    fn from(item: FlaggedContent) -> Self {
        Self {
            flag: FlagResponse::from(item.flag),
            title: item.title,
            content: item.content,
            flag_count: item.flag_count,
        }
    }
}
