//! Domain entities - core business objects

mod ban;
mod flag;
mod moderation;
mod reply;
mod thread;

pub use ban::{UserBan, MAX_BAN_DAYS};
pub use flag::{
    check_resolution, ContentFlag, FlagStatus, FlaggedContent, MAX_FLAG_DETAILS_LENGTH,
};
pub use moderation::{
    optional_reason, required_reason, ActionType, ModerationAction, ModerationDetail, TargetKind,
    MAX_REASON_LENGTH,
};
pub use reply::{
    validate_reply_content, Reply, ReplyDraft, REPLY_CONTENT_MAX_LENGTH, REPLY_CONTENT_MIN_LENGTH,
};
pub use thread::{
    normalize_tags, Thread, ThreadDraft, MAX_TAGS, TAG_MAX_LENGTH, THREAD_CONTENT_MAX_LENGTH,
    THREAD_CONTENT_MIN_LENGTH, TITLE_MAX_LENGTH, TITLE_MIN_LENGTH,
};

use crate::error::DomainError;

/// Check a text field's length in characters (not bytes)
pub(crate) fn check_char_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(DomainError::validation(
            field,
            format!("must be between {min} and {max} characters"),
        ));
    }
    Ok(())
}
