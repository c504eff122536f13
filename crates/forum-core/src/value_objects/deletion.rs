//! Soft-delete state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::UserId;

/// Whether a thread or reply has been soft-deleted, and by whom.
///
/// Rows are never removed. A deleted reply keeps its path and depth so its
/// descendants stay anchored in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Deletion {
    #[default]
    Live,
    Deleted { at: DateTime<Utc>, by: UserId },
}

impl Deletion {
    /// Mark as deleted now
    pub fn now(by: UserId) -> Self {
        Self::Deleted { at: Utc::now(), by }
    }

    /// Rebuild from the stored `deleted_at` / `deleted_by` columns.
    ///
    /// The columns are written together; a row with only one of them set is
    /// treated as live.
    pub fn from_columns(at: Option<DateTime<Utc>>, by: Option<UserId>) -> Self {
        match (at, by) {
            (Some(at), Some(by)) => Self::Deleted { at, by },
            _ => Self::Live,
        }
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        !self.is_deleted()
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Deleted { at, .. } => Some(*at),
            Self::Live => None,
        }
    }

    pub fn deleted_by(&self) -> Option<UserId> {
        match self {
            Self::Deleted { by, .. } => Some(*by),
            Self::Live => None,
        }
    }
}
