//! Tree reconstruction from flat, path-ordered reply rows

mod reconstruct;

pub use reconstruct::{build_reply_tree, count_nodes, ReplyNode};
