//! Business logic services
//!
//! Each service borrows the [`ServiceContext`] and orchestrates domain
//! operations over the repository ports.

pub mod access;
pub mod context;
pub mod error;
pub mod flag;
pub mod moderation;
pub mod reply;
pub mod thread;

pub use access::AccessService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use flag::FlagService;
pub use moderation::ModerationService;
pub use reply::ReplyService;
pub use thread::ThreadService;
