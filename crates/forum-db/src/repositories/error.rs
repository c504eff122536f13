//! Error handling utilities for repositories

use forum_core::error::DomainError;
use forum_core::value_objects::{ReplyId, ThreadId, UserId};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "thread not found" error
pub fn thread_not_found(id: ThreadId) -> DomainError {
    DomainError::ThreadNotFound(id)
}

/// Create a "reply not found" error
pub fn reply_not_found(id: ReplyId) -> DomainError {
    DomainError::ReplyNotFound(id)
}

/// Create a "user not found" error
pub fn user_not_found(id: UserId) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Clamp caller-supplied paging values to safe bounds
pub fn page_bounds(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, 100), offset.max(0))
}
