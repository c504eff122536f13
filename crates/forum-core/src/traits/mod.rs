//! Repository traits (ports)

mod repositories;

pub use repositories::{
    BanQuery, BanRepository, FlagQuery, FlagRepository, ModerationQuery, ModerationRepository,
    RepoResult, ReplyRepository, ThreadQuery, ThreadRepository,
};
