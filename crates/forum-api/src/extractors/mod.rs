//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, ids and listing filters.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{AuthUser, ModeratorUser};
pub use path::IdPath;
pub use query::{BanListQuery, Filters, FlagQueueQuery, ModerationLogQuery, ThreadListQuery};
pub use validated::{OptionalValidatedJson, ValidatedJson};
