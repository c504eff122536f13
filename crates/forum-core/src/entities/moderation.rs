//! Moderation log entries
//!
//! Every moderation transition appends exactly one [`ModerationAction`]. The
//! action's payload is a closed sum type keyed by action kind, so each entry
//! carries exactly the fields that kind needs.
//!
//! Storage keeps three flat columns (`action_type`, `target_type`,
//! `target_id`) plus a JSON `metadata` object holding whatever else the
//! variant carries. [`ModerationDetail::metadata`] and
//! [`ModerationDetail::from_stored`] convert between the two shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{ActionId, BanId, ThreadId, UserId};

/// Longest accepted moderation reason
pub const MAX_REASON_LENGTH: usize = 500;

// =============================================================================
// Action kinds
// =============================================================================

/// Kind of moderation action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    LockThread,
    UnlockThread,
    PinThread,
    UnpinThread,
    DeleteThread,
    BanUser,
    UnbanUser,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LockThread => "lock_thread",
            Self::UnlockThread => "unlock_thread",
            Self::PinThread => "pin_thread",
            Self::UnpinThread => "unpin_thread",
            Self::DeleteThread => "delete_thread",
            Self::BanUser => "ban_user",
            Self::UnbanUser => "unban_user",
        }
    }

    /// Kind of entity this action targets
    pub fn target_kind(&self) -> TargetKind {
        match self {
            Self::BanUser | Self::UnbanUser => TargetKind::User,
            _ => TargetKind::Thread,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lock_thread" => Ok(Self::LockThread),
            "unlock_thread" => Ok(Self::UnlockThread),
            "pin_thread" => Ok(Self::PinThread),
            "unpin_thread" => Ok(Self::UnpinThread),
            "delete_thread" => Ok(Self::DeleteThread),
            "ban_user" => Ok(Self::BanUser),
            "unban_user" => Ok(Self::UnbanUser),
            other => Err(format!("unknown action type '{other}'")),
        }
    }
}

/// Kind of entity a moderation action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Thread,
    Reply,
    User,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thread => "thread",
            Self::Reply => "reply",
            Self::User => "user",
        }
    }

    /// Key under which the target id appears in a serialized detail
    fn id_key(&self) -> &'static str {
        match self {
            Self::Thread => "thread_id",
            Self::Reply => "reply_id",
            Self::User => "user_id",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thread" => Ok(Self::Thread),
            "reply" => Ok(Self::Reply),
            "user" => Ok(Self::User),
            other => Err(format!("unknown target type '{other}'")),
        }
    }
}

// =============================================================================
// Typed detail
// =============================================================================

/// What a moderation action did, with the fields specific to each kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum ModerationDetail {
    LockThread {
        thread_id: ThreadId,
    },
    UnlockThread {
        thread_id: ThreadId,
    },
    PinThread {
        thread_id: ThreadId,
    },
    UnpinThread {
        thread_id: ThreadId,
    },
    DeleteThread {
        thread_id: ThreadId,
    },
    BanUser {
        user_id: UserId,
        ban_id: BanId,
        expires_at: Option<DateTime<Utc>>,
    },
    UnbanUser {
        user_id: UserId,
    },
}

impl ModerationDetail {
    /// Lock or unlock, depending on the requested state
    pub fn lock(thread_id: ThreadId, locked: bool) -> Self {
        if locked {
            Self::LockThread { thread_id }
        } else {
            Self::UnlockThread { thread_id }
        }
    }

    /// Pin or unpin, depending on the requested state
    pub fn pin(thread_id: ThreadId, pinned: bool) -> Self {
        if pinned {
            Self::PinThread { thread_id }
        } else {
            Self::UnpinThread { thread_id }
        }
    }

    pub fn action_type(&self) -> ActionType {
        match self {
            Self::LockThread { .. } => ActionType::LockThread,
            Self::UnlockThread { .. } => ActionType::UnlockThread,
            Self::PinThread { .. } => ActionType::PinThread,
            Self::UnpinThread { .. } => ActionType::UnpinThread,
            Self::DeleteThread { .. } => ActionType::DeleteThread,
            Self::BanUser { .. } => ActionType::BanUser,
            Self::UnbanUser { .. } => ActionType::UnbanUser,
        }
    }

    /// Target kind and raw target id
    pub fn target(&self) -> (TargetKind, Uuid) {
        match self {
            Self::LockThread { thread_id }
            | Self::UnlockThread { thread_id }
            | Self::PinThread { thread_id }
            | Self::UnpinThread { thread_id }
            | Self::DeleteThread { thread_id } => (TargetKind::Thread, thread_id.into_inner()),
            Self::BanUser { user_id, .. } | Self::UnbanUser { user_id } => {
                (TargetKind::User, user_id.into_inner())
            }
        }
    }

    /// Thread targeted by this action, if it is a thread action
    pub fn thread_id(&self) -> Option<ThreadId> {
        match self.target() {
            (TargetKind::Thread, id) => Some(ThreadId::from_uuid(id)),
            _ => None,
        }
    }

    /// Fields beyond kind and target, as stored in the metadata column
    pub fn metadata(&self) -> Value {
        let mut map = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        map.remove("action_type");
        map.remove(self.action_type().target_kind().id_key());
        Value::Object(map)
    }

    /// Rebuild a detail from its stored columns
    pub fn from_stored(action_type: &str, target_id: Uuid, metadata: Value) -> Result<Self, DomainError> {
        let kind = ActionType::from_str(action_type).map_err(DomainError::InternalError)?;

        let mut map = match metadata {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(DomainError::InternalError(format!(
                    "moderation metadata must be an object, got {other}"
                )))
            }
        };
        map.insert("action_type".to_string(), Value::String(kind.as_str().to_string()));
        map.insert(
            kind.target_kind().id_key().to_string(),
            Value::String(target_id.hyphenated().to_string()),
        );

        serde_json::from_value(Value::Object(map))
            .map_err(|e| DomainError::InternalError(format!("corrupt moderation entry: {e}")))
    }
}

// =============================================================================
// Log entry
// =============================================================================

/// One append-only moderation log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationAction {
    pub id: ActionId,
    pub moderator_id: UserId,
    pub detail: ModerationDetail,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ModerationAction {
    pub fn new(moderator_id: UserId, detail: ModerationDetail, reason: Option<String>) -> Self {
        Self {
            id: ActionId::generate(),
            moderator_id,
            detail,
            reason,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn action_type(&self) -> ActionType {
        self.detail.action_type()
    }
}

// =============================================================================
// Reasons
// =============================================================================

/// A reason that must be present (delete thread, ban user)
pub fn required_reason(reason: &str) -> Result<String, DomainError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(DomainError::validation("reason", "a reason is required"));
    }
    check_reason_length(reason)?;
    Ok(reason.to_string())
}

/// A reason that may be omitted (lock, pin, unban). Blank becomes `None`.
pub fn optional_reason(reason: Option<&str>) -> Result<Option<String>, DomainError> {
    match reason.map(str::trim) {
        None | Some("") => Ok(None),
        Some(reason) => {
            check_reason_length(reason)?;
            Ok(Some(reason.to_string()))
        }
    }
}

fn check_reason_length(reason: &str) -> Result<(), DomainError> {
    if reason.chars().count() > MAX_REASON_LENGTH {
        return Err(DomainError::validation(
            "reason",
            format!("must be at most {MAX_REASON_LENGTH} characters"),
        ));
    }
    Ok(())
}
