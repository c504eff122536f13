//! Value objects - immutable types that represent domain concepts

mod actor;
mod deletion;
mod ids;
mod reply_path;
mod thread_sort;

pub use actor::Actor;
pub use deletion::Deletion;
pub use ids::{ActionId, BanId, FlagId, IdParseError, ReplyId, ThreadId, TopicId, UserId};
pub use reply_path::{path_segment, ReplyPath, ReplyPlacement, MAX_REPLY_DEPTH, PATH_SEPARATOR, SEGMENT_LEN};
pub use thread_sort::ThreadSort;
