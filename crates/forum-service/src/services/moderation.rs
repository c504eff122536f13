//! Moderation service
//!
//! Lock, pin, delete, ban and unban. Every transition is applied together
//! with its log entry in one repository call, so a state change never exists
//! without its audit row. Repeating a lock or pin is accepted and logged again.
//!
//! Also serves the flag review queue. Resolving a flag is not a logged
//! transition; the flag row records who reviewed it and when.

use forum_core::entities::{
    check_resolution, optional_reason, required_reason, ModerationAction, ModerationDetail,
    UserBan,
};
use forum_core::traits::{BanQuery, FlagQuery, ModerationQuery};
use forum_core::value_objects::{Actor, FlagId, ThreadId, UserId};
use tracing::{info, instrument};

use crate::dto::{
    BanModerationResponse, BanResponse, BanUserRequest, DeleteThreadRequest, FlagQueueParams,
    FlagResponse, FlaggedContentResponse, ListBansParams, LockThreadRequest,
    ModerationActionResponse, ModerationLogParams, PaginatedResponse, PinThreadRequest,
    ResolveFlagRequest, ThreadModerationResponse, UnbanUserRequest,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Moderation service
pub struct ModerationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ModerationService<'a> {
    /// Create a new ModerationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Lock or unlock a thread
    #[instrument(skip(self, request), fields(moderator_id = %actor.user_id))]
    pub async fn set_thread_lock(
        &self,
        actor: &Actor,
        thread_id: ThreadId,
        request: LockThreadRequest,
    ) -> ServiceResult<ThreadModerationResponse> {
        AccessService::new(self.ctx).require_moderator(actor)?;
        let reason = optional_reason(request.reason.as_deref())?;

        self.apply_thread_action(actor, ModerationDetail::lock(thread_id, request.locked), reason)
            .await
    }

    /// Pin or unpin a thread
    #[instrument(skip(self, request), fields(moderator_id = %actor.user_id))]
    pub async fn set_thread_pin(
        &self,
        actor: &Actor,
        thread_id: ThreadId,
        request: PinThreadRequest,
    ) -> ServiceResult<ThreadModerationResponse> {
        AccessService::new(self.ctx).require_moderator(actor)?;
        let reason = optional_reason(request.reason.as_deref())?;

        self.apply_thread_action(actor, ModerationDetail::pin(thread_id, request.pinned), reason)
            .await
    }

    /// Soft delete a thread; a reason is mandatory
    #[instrument(skip(self, request), fields(moderator_id = %actor.user_id))]
    pub async fn delete_thread(
        &self,
        actor: &Actor,
        thread_id: ThreadId,
        request: DeleteThreadRequest,
    ) -> ServiceResult<ThreadModerationResponse> {
        AccessService::new(self.ctx).require_moderator(actor)?;
        let reason = required_reason(&request.reason)?;

        self.apply_thread_action(actor, ModerationDetail::DeleteThread { thread_id }, Some(reason))
            .await
    }

    /// Ban a user for `duration_days` days, or permanently for 0
    #[instrument(skip(self, request), fields(moderator_id = %actor.user_id))]
    pub async fn ban_user(
        &self,
        actor: &Actor,
        user_id: UserId,
        request: BanUserRequest,
    ) -> ServiceResult<BanModerationResponse> {
        AccessService::new(self.ctx).require_moderator(actor)?;
        let reason = required_reason(&request.reason)?;

        let ban = UserBan::issue(user_id, actor.user_id, reason.clone(), request.duration_days)?;
        let action = ModerationAction::new(
            actor.user_id,
            ModerationDetail::BanUser {
                user_id,
                ban_id: ban.id,
                expires_at: ban.expires_at,
            },
            Some(reason),
        );

        self.ctx.ban_repo().ban_user(&ban, &action).await?;

        info!(
            user_id = %user_id,
            ban_id = %ban.id,
            permanent = ban.is_permanent(),
            "User banned"
        );

        Ok(BanModerationResponse {
            ban: BanResponse::from(&ban),
            action: ModerationActionResponse::from(action),
        })
    }

    /// Lift a user's active ban
    #[instrument(skip(self, request), fields(moderator_id = %actor.user_id))]
    pub async fn unban_user(
        &self,
        actor: &Actor,
        user_id: UserId,
        request: UnbanUserRequest,
    ) -> ServiceResult<BanModerationResponse> {
        AccessService::new(self.ctx).require_moderator(actor)?;
        let reason = optional_reason(request.reason.as_deref())?;

        let action = ModerationAction::new(actor.user_id, ModerationDetail::UnbanUser { user_id }, reason);
        let ban = self.ctx.ban_repo().unban_user(user_id, &action).await?;

        info!(user_id = %user_id, ban_id = %ban.id, "User unbanned");

        Ok(BanModerationResponse {
            ban: BanResponse::from(ban),
            action: ModerationActionResponse::from(action),
        })
    }

    /// Read the moderation log, newest first
    #[instrument(skip(self))]
    pub async fn moderation_log(
        &self,
        actor: &Actor,
        params: ModerationLogParams,
    ) -> ServiceResult<PaginatedResponse<ModerationActionResponse>> {
        AccessService::new(self.ctx).require_moderator(actor)?;

        let actions = self
            .ctx
            .moderation_repo()
            .list_actions(&ModerationQuery {
                action: params.action,
                target_type: params.target_type,
                limit: params.page.limit(),
                offset: params.page.offset(),
            })
            .await?;

        Ok(PaginatedResponse::without_total(
            actions.into_iter().map(ModerationActionResponse::from).collect(),
            params.page.page,
            params.page.per_page,
        ))
    }

    /// List bans, newest first
    #[instrument(skip(self))]
    pub async fn list_bans(
        &self,
        actor: &Actor,
        params: ListBansParams,
    ) -> ServiceResult<PaginatedResponse<BanResponse>> {
        AccessService::new(self.ctx).require_moderator(actor)?;

        let bans = self
            .ctx
            .ban_repo()
            .list_bans(&BanQuery {
                active_only: params.active_only,
                limit: params.page.limit(),
                offset: params.page.offset(),
            })
            .await?;

        Ok(PaginatedResponse::without_total(
            bans.into_iter().map(BanResponse::from).collect(),
            params.page.page,
            params.page.per_page,
        ))
    }

    /// Flags in the requested status with their targets, newest first
    #[instrument(skip(self))]
    pub async fn flagged_content(
        &self,
        actor: &Actor,
        params: FlagQueueParams,
    ) -> ServiceResult<PaginatedResponse<FlaggedContentResponse>> {
        AccessService::new(self.ctx).require_moderator(actor)?;

        let items = self
            .ctx
            .flag_repo()
            .list_flags(&FlagQuery {
                status: params.status,
                limit: params.page.limit(),
                offset: params.page.offset(),
            })
            .await?;

        Ok(PaginatedResponse::without_total(
            items.into_iter().map(FlaggedContentResponse::from).collect(),
            params.page.page,
            params.page.per_page,
        ))
    }

    /// Close a pending flag as reviewed or dismissed
    #[instrument(skip(self, request), fields(moderator_id = %actor.user_id))]
    pub async fn resolve_flag(
        &self,
        actor: &Actor,
        flag_id: FlagId,
        request: ResolveFlagRequest,
    ) -> ServiceResult<FlagResponse> {
        AccessService::new(self.ctx).require_moderator(actor)?;
        check_resolution(request.status)?;

        let flag = self
            .ctx
            .flag_repo()
            .resolve_flag(flag_id, request.status, actor.user_id)
            .await?;

        info!(flag_id = %flag.id, status = %flag.status, "Flag resolved");

        Ok(FlagResponse::from(flag))
    }

    async fn apply_thread_action(
        &self,
        actor: &Actor,
        detail: ModerationDetail,
        reason: Option<String>,
    ) -> ServiceResult<ThreadModerationResponse> {
        let action = ModerationAction::new(actor.user_id, detail, reason);
        let thread = self.ctx.moderation_repo().apply_thread_action(&action).await?;

        info!(
            thread_id = %thread.id,
            action_type = %action.action_type(),
            "Thread moderated"
        );

        Ok(ThreadModerationResponse {
            thread_id: thread.id,
            locked: thread.locked,
            pinned: thread.pinned,
            deleted: thread.is_deleted(),
            action: ModerationActionResponse::from(action),
        })
    }
}
