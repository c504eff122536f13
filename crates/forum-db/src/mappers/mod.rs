//! Entity to model mappers
//!
//! This module provides conversions between domain entities (forum-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod ban;
mod flag;
mod moderation;
mod reply;
mod thread;

pub use ban::UserBanInsert;
pub use flag::ContentFlagInsert;
pub use moderation::ModerationActionInsert;
pub use reply::ReplyInsert;
pub use thread::ThreadInsert;
