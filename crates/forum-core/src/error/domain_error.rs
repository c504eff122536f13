//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{FlagId, ReplyId, ThreadId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Thread not found: {0}")]
    ThreadNotFound(ThreadId),

    #[error("Reply not found: {0}")]
    ReplyNotFound(ReplyId),

    #[error("Parent reply not found in this thread: {0}")]
    ParentReplyNotFound(ReplyId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Flag not found: {0}")]
    FlagNotFound(FlagId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("Maximum reply depth of {max} exceeded")]
    MaxDepthExceeded { max: i32 },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the author can modify this reply")]
    NotReplyAuthor,

    #[error("Thread is locked")]
    ThreadLocked,

    #[error("Moderator capability required")]
    ModeratorRequired,

    #[error("User is banned")]
    UserBanned,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Cannot ban yourself")]
    CannotBanSelf,

    #[error("User is already banned")]
    AlreadyBanned,

    #[error("User has no active ban")]
    NotBanned,

    #[error("Content already flagged and awaiting review")]
    AlreadyFlagged,

    #[error("Flag has already been resolved")]
    FlagAlreadyResolved,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Build a validation error for a named field
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ThreadNotFound(_) => "UNKNOWN_THREAD",
            Self::ReplyNotFound(_) => "UNKNOWN_REPLY",
            Self::ParentReplyNotFound(_) => "UNKNOWN_PARENT_REPLY",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::FlagNotFound(_) => "UNKNOWN_FLAG",

            // Validation
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::MaxDepthExceeded { .. } => "MAX_DEPTH_EXCEEDED",

            // Authorization
            Self::NotReplyAuthor => "NOT_REPLY_AUTHOR",
            Self::ThreadLocked => "THREAD_LOCKED",
            Self::ModeratorRequired => "MODERATOR_REQUIRED",
            Self::UserBanned => "USER_BANNED",

            // Conflict
            Self::CannotBanSelf => "CANNOT_BAN_SELF",
            Self::AlreadyBanned => "USER_ALREADY_BANNED",
            Self::NotBanned => "USER_NOT_BANNED",
            Self::AlreadyFlagged => "ALREADY_FLAGGED",
            Self::FlagAlreadyResolved => "FLAG_ALREADY_RESOLVED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Name of the offending field, for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::MaxDepthExceeded { .. } => Some("parent_reply_id"),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ThreadNotFound(_)
                | Self::ReplyNotFound(_)
                | Self::ParentReplyNotFound(_)
                | Self::UserNotFound(_)
                | Self::FlagNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::MaxDepthExceeded { .. })
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotReplyAuthor | Self::ThreadLocked | Self::ModeratorRequired | Self::UserBanned
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::CannotBanSelf
                | Self::AlreadyBanned
                | Self::NotBanned
                | Self::AlreadyFlagged
                | Self::FlagAlreadyResolved
        )
    }
}
