//! Content flags
//!
//! Members flag a thread or reply for moderator review. A flag starts
//! `pending` and is resolved once, to `reviewed` or `dismissed`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::moderation::required_reason;
use super::TargetKind;
use crate::error::DomainError;
use crate::value_objects::{FlagId, UserId};

/// Longest accepted free-text detail on a flag
pub const MAX_FLAG_DETAILS_LENGTH: usize = 1000;

/// Review state of a flag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagStatus {
    #[default]
    Pending,
    Reviewed,
    Dismissed,
}

impl FlagStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::Dismissed => "dismissed",
        }
    }

    #[inline]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for FlagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlagStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "reviewed" => Ok(Self::Reviewed),
            "dismissed" => Ok(Self::Dismissed),
            other => Err(format!("unknown flag status '{other}'")),
        }
    }
}

/// A member's report against a thread or reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFlag {
    pub id: FlagId,
    pub target_type: TargetKind,
    pub target_id: Uuid,
    pub reporter_id: UserId,
    pub reason: String,
    pub details: Option<String>,
    pub status: FlagStatus,
    pub created_at: DateTime<Utc>,
    pub reviewed_by: Option<UserId>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl ContentFlag {
    /// Raise a new pending flag. Only threads and replies can be flagged.
    pub fn raise(
        reporter_id: UserId,
        target_type: TargetKind,
        target_id: Uuid,
        reason: &str,
        details: Option<&str>,
    ) -> Result<Self, DomainError> {
        if target_type == TargetKind::User {
            return Err(DomainError::validation(
                "target_type",
                "only threads and replies can be flagged",
            ));
        }

        let reason = required_reason(reason)?;
        let details = match details.map(str::trim) {
            None | Some("") => None,
            Some(text) if text.chars().count() > MAX_FLAG_DETAILS_LENGTH => {
                return Err(DomainError::validation(
                    "details",
                    format!("must be at most {MAX_FLAG_DETAILS_LENGTH} characters"),
                ))
            }
            Some(text) => Some(text.to_string()),
        };

        Ok(Self {
            id: FlagId::generate(),
            target_type,
            target_id,
            reporter_id,
            reason,
            details,
            status: FlagStatus::Pending,
            created_at: Utc::now(),
            reviewed_by: None,
            reviewed_at: None,
        })
    }

    /// Close a pending flag with the moderator's verdict
    pub fn resolve(&mut self, moderator_id: UserId, status: FlagStatus) -> Result<(), DomainError> {
        check_resolution(status)?;
        if self.status.is_resolved() {
            return Err(DomainError::FlagAlreadyResolved);
        }
        self.status = status;
        self.reviewed_by = Some(moderator_id);
        self.reviewed_at = Some(Utc::now());
        Ok(())
    }
}

/// A verdict must move the flag out of `pending`
pub fn check_resolution(status: FlagStatus) -> Result<(), DomainError> {
    if status.is_resolved() {
        Ok(())
    } else {
        Err(DomainError::validation(
            "status",
            "must be 'reviewed' or 'dismissed'",
        ))
    }
}

/// Queue entry: a flag with a snapshot of what it points at.
///
/// `content` is `None` once the target has been deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedContent {
    pub flag: ContentFlag,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Flags raised against the same target, any status
    pub flag_count: i64,
}
