//! Materialized reply paths
//!
//! A reply's path is the chain of segments from its root reply down to itself,
//! joined by [`PATH_SEPARATOR`]. Each segment is derived from the reply's own
//! id, so allocating a path never reads sibling state:
//!
//! - root reply: `path = segment(id)`, `depth = 0`
//! - child reply: `path = parent.path + "." + segment(id)`, `depth = parent.depth + 1`
//!
//! Segments are fixed-width and sort in id order, so ordering a thread's
//! replies by path (byte-wise) is a pre-order traversal of the reply tree.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;
use crate::value_objects::ReplyId;

/// Deepest allowed reply depth (roots are depth 0)
pub const MAX_REPLY_DEPTH: i32 = 10;

/// Separator between path segments
pub const PATH_SEPARATOR: char = '.';

/// Length of a single segment (a hyphenated UUID)
pub const SEGMENT_LEN: usize = 36;

/// Materialized path of a reply
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplyPath(String);

/// Where a new reply sits in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPlacement {
    pub path: ReplyPath,
    pub depth: i32,
}

/// Build the path segment for a reply id.
///
/// Hyphens are not valid in hierarchical label columns, so they become
/// underscores. Lowercase hex keeps the byte order equal to the id order.
pub fn path_segment(id: ReplyId) -> String {
    id.into_inner().hyphenated().to_string().replace('-', "_")
}

impl ReplyPath {
    /// Path of a top-level reply
    pub fn root(id: ReplyId) -> Self {
        Self(path_segment(id))
    }

    /// Path of a reply placed directly under `self`
    pub fn child(&self, id: ReplyId) -> Self {
        let mut path = String::with_capacity(self.0.len() + 1 + SEGMENT_LEN);
        path.push_str(&self.0);
        path.push(PATH_SEPARATOR);
        path.push_str(&path_segment(id));
        Self(path)
    }

    /// Wrap a path read back from storage
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Iterate the segments from the root down
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(PATH_SEPARATOR)
    }

    /// Depth implied by the number of segments
    pub fn implied_depth(&self) -> i32 {
        self.segments().count() as i32 - 1
    }

    /// Path of the parent reply, if this is not a root
    pub fn parent(&self) -> Option<ReplyPath> {
        self.0
            .rfind(PATH_SEPARATOR)
            .map(|idx| ReplyPath(self.0[..idx].to_string()))
    }

    /// Whether `self` is a strict ancestor of `other`
    pub fn is_ancestor_of(&self, other: &ReplyPath) -> bool {
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0[self.0.len()..].starts_with(PATH_SEPARATOR)
    }
}

impl fmt::Display for ReplyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ReplyPlacement {
    /// Placement of a top-level reply
    pub fn root(id: ReplyId) -> Self {
        Self {
            path: ReplyPath::root(id),
            depth: 0,
        }
    }

    /// Placement of a reply under a parent with the given stored path and depth.
    ///
    /// The parent depth must come from the same transaction that inserts the
    /// reply. A soft-deleted parent is still a valid anchor.
    pub fn under(parent_path: &ReplyPath, parent_depth: i32, id: ReplyId) -> Result<Self, DomainError> {
        if parent_depth >= MAX_REPLY_DEPTH {
            return Err(DomainError::MaxDepthExceeded {
                max: MAX_REPLY_DEPTH,
            });
        }

        Ok(Self {
            path: parent_path.child(id),
            depth: parent_depth + 1,
        })
    }
}
