//! Flag service
//!
//! Members report threads and replies; moderators work the resulting queue
//! through [`ModerationService`](super::ModerationService).

use forum_core::entities::ContentFlag;
use forum_core::value_objects::Actor;
use tracing::{info, instrument};

use crate::dto::{FlagContentRequest, FlagResponse};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Flag service
pub struct FlagService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FlagService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Flag a live thread or reply for review
    #[instrument(skip(self, request), fields(reporter_id = %actor.user_id))]
    pub async fn flag_content(
        &self,
        actor: &Actor,
        request: FlagContentRequest,
    ) -> ServiceResult<FlagResponse> {
        AccessService::new(self.ctx)
            .require_not_banned(actor.user_id)
            .await?;

        let flag = ContentFlag::raise(
            actor.user_id,
            request.target_type,
            request.target_id,
            &request.reason,
            request.details.as_deref(),
        )?;

        self.ctx.flag_repo().create_flag(&flag).await?;

        info!(
            flag_id = %flag.id,
            target_type = %flag.target_type,
            target_id = %flag.target_id,
            "Content flagged"
        );

        Ok(FlagResponse::from(flag))
    }
}
