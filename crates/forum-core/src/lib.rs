//! # forum-core
//!
//! Domain layer for hierarchical threaded discussions: threads, replies placed
//! by materialized path, tree reconstruction, the moderation state machine and
//! the repository traits that storage implements.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod tree;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActionType, ContentFlag, FlagStatus, FlaggedContent, ModerationAction, ModerationDetail, Reply,
    ReplyDraft, TargetKind, Thread, ThreadDraft, UserBan,
};
pub use error::DomainError;
pub use traits::{
    BanQuery, BanRepository, FlagQuery, FlagRepository, ModerationQuery, ModerationRepository,
    RepoResult, ReplyRepository, ThreadQuery, ThreadRepository,
};
pub use tree::{build_reply_tree, ReplyNode};
pub use value_objects::{
    Actor, ActionId, BanId, Deletion, FlagId, IdParseError, ReplyId, ReplyPath, ReplyPlacement,
    ThreadId, ThreadSort, TopicId, UserId, MAX_REPLY_DEPTH,
};
