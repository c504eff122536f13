//! Access checks shared by the services

use forum_core::error::DomainError;
use forum_core::value_objects::{Actor, UserId};
use tracing::{debug, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Capability and ban checks for an actor
pub struct AccessService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccessService<'a> {
    /// Create a new AccessService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Require the moderator capability
    pub fn require_moderator(&self, actor: &Actor) -> ServiceResult<()> {
        actor.require_moderator()?;
        Ok(())
    }

    /// Fail with `USER_BANNED` while the user has a ban in force
    #[instrument(skip(self))]
    pub async fn require_not_banned(&self, user_id: UserId) -> ServiceResult<()> {
        if let Some(ban) = self.ctx.ban_repo().find_active_ban(user_id).await? {
            debug!(ban_id = %ban.id, "Rejected write from banned user");
            return Err(DomainError::UserBanned.into());
        }
        Ok(())
    }
}
