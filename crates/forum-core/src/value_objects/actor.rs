//! Caller identity handed to every mutating operation

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::UserId;

/// The authenticated caller.
///
/// Identity is established outside the engine; the engine only trusts the id
/// and the moderator capability it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub is_moderator: bool,
}

impl Actor {
    /// Ordinary member
    pub fn member(user_id: UserId) -> Self {
        Self {
            user_id,
            is_moderator: false,
        }
    }

    /// Member with moderator capability
    pub fn moderator(user_id: UserId) -> Self {
        Self {
            user_id,
            is_moderator: true,
        }
    }

    /// Fail with `ModeratorRequired` unless the actor is a moderator
    pub fn require_moderator(&self) -> Result<(), DomainError> {
        if self.is_moderator {
            Ok(())
        } else {
            Err(DomainError::ModeratorRequired)
        }
    }
}
