//! User ban entity

use chrono::{DateTime, Duration, Utc};

use crate::error::DomainError;
use crate::value_objects::{BanId, UserId};

/// Longest temporary ban, in days. Zero means permanent.
pub const MAX_BAN_DAYS: u32 = 36_500;

/// A ban placed on a user by a moderator.
///
/// Expiry is evaluated when read; nothing sweeps expired bans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBan {
    pub id: BanId,
    pub user_id: UserId,
    pub moderator_id: UserId,
    pub reason: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl UserBan {
    /// Issue a new ban. `duration_days == 0` makes it permanent.
    pub fn issue(
        user_id: UserId,
        moderator_id: UserId,
        reason: String,
        duration_days: u32,
    ) -> Result<Self, DomainError> {
        if user_id == moderator_id {
            return Err(DomainError::CannotBanSelf);
        }
        if duration_days > MAX_BAN_DAYS {
            return Err(DomainError::validation(
                "duration_days",
                format!("must be between 0 and {MAX_BAN_DAYS}"),
            ));
        }

        let now = Utc::now();
        let expires_at = (duration_days > 0).then(|| now + Duration::days(i64::from(duration_days)));

        Ok(Self {
            id: BanId::generate(),
            user_id,
            moderator_id,
            reason,
            expires_at,
            active: true,
            created_at: now,
        })
    }

    #[inline]
    pub fn is_permanent(&self) -> bool {
        self.expires_at.is_none()
    }

    /// Whether the ban is in force at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires) => self.active && expires > now,
            None => self.active,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}
