//! Database models - SQLx-compatible structs for PostgreSQL tables

mod ban;
mod flag;
mod moderation;
mod reply;
mod thread;

pub use ban::UserBanModel;
pub use flag::{ContentFlagModel, FlaggedContentModel};
pub use moderation::ModerationActionModel;
pub use reply::ReplyModel;
pub use thread::ThreadModel;
