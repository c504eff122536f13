//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in forum-core.
//! Each repository owns the transaction boundaries of its writes.

mod ban;
mod error;
mod flag;
mod moderation;
mod reply;
mod thread;

pub use ban::PgBanRepository;
pub use flag::PgFlagRepository;
pub use moderation::PgModerationRepository;
pub use reply::PgReplyRepository;
pub use thread::PgThreadRepository;
