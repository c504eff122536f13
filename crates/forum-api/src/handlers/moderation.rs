//! Moderation handlers
//!
//! Every route here sits under `/admin` and requires the moderator capability.

use axum::{extract::State, Json};
use forum_core::{FlagId, ThreadId, UserId};
use forum_service::dto::{
    BanModerationResponse, BanResponse, BanUserRequest, DeleteThreadRequest, FlagQueueParams,
    FlagResponse, FlaggedContentResponse, ListBansParams, LockThreadRequest,
    ModerationActionResponse, ModerationLogParams, PaginatedResponse, PinThreadRequest,
    ResolveFlagRequest, ThreadModerationResponse, UnbanUserRequest,
};
use forum_service::ModerationService;

use crate::extractors::{Filters, IdPath, ModeratorUser, OptionalValidatedJson, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /admin/threads/{thread_id}/lock
pub async fn lock_thread(
    State(state): State<AppState>,
    ModeratorUser(actor): ModeratorUser,
    IdPath(thread_id): IdPath<ThreadId>,
    ValidatedJson(request): ValidatedJson<LockThreadRequest>,
) -> ApiResult<Json<ThreadModerationResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.set_thread_lock(&actor, thread_id, request).await?;
    Ok(Json(response))
}

/// POST /admin/threads/{thread_id}/pin
pub async fn pin_thread(
    State(state): State<AppState>,
    ModeratorUser(actor): ModeratorUser,
    IdPath(thread_id): IdPath<ThreadId>,
    ValidatedJson(request): ValidatedJson<PinThreadRequest>,
) -> ApiResult<Json<ThreadModerationResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.set_thread_pin(&actor, thread_id, request).await?;
    Ok(Json(response))
}

/// POST /admin/threads/{thread_id}/delete
pub async fn delete_thread(
    State(state): State<AppState>,
    ModeratorUser(actor): ModeratorUser,
    IdPath(thread_id): IdPath<ThreadId>,
    ValidatedJson(request): ValidatedJson<DeleteThreadRequest>,
) -> ApiResult<Json<ThreadModerationResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.delete_thread(&actor, thread_id, request).await?;
    Ok(Json(response))
}

/// POST /admin/users/{user_id}/ban
pub async fn ban_user(
    State(state): State<AppState>,
    ModeratorUser(actor): ModeratorUser,
    IdPath(user_id): IdPath<UserId>,
    ValidatedJson(request): ValidatedJson<BanUserRequest>,
) -> ApiResult<Json<BanModerationResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.ban_user(&actor, user_id, request).await?;
    Ok(Json(response))
}

/// POST /admin/users/{user_id}/unban
///
/// The body is optional.
pub async fn unban_user(
    State(state): State<AppState>,
    ModeratorUser(actor): ModeratorUser,
    IdPath(user_id): IdPath<UserId>,
    OptionalValidatedJson(request): OptionalValidatedJson<UnbanUserRequest>,
) -> ApiResult<Json<BanModerationResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.unban_user(&actor, user_id, request).await?;
    Ok(Json(response))
}

/// GET /admin/moderation-log?action=&target_type=&page=&per_page=
pub async fn moderation_log(
    State(state): State<AppState>,
    ModeratorUser(actor): ModeratorUser,
    Filters(params): Filters<ModerationLogParams>,
) -> ApiResult<Json<PaginatedResponse<ModerationActionResponse>>> {
    let service = ModerationService::new(state.service_context());
    let page = service.moderation_log(&actor, params).await?;
    Ok(Json(page))
}

/// GET /admin/bans?active=&page=&per_page=
pub async fn list_bans(
    State(state): State<AppState>,
    ModeratorUser(actor): ModeratorUser,
    Filters(params): Filters<ListBansParams>,
) -> ApiResult<Json<PaginatedResponse<BanResponse>>> {
    let service = ModerationService::new(state.service_context());
    let page = service.list_bans(&actor, params).await?;
    Ok(Json(page))
}

/// GET /admin/flagged?status=&page=&per_page=
///
/// `status` defaults to `pending`.
pub async fn flagged_content(
    State(state): State<AppState>,
    ModeratorUser(actor): ModeratorUser,
    Filters(params): Filters<FlagQueueParams>,
) -> ApiResult<Json<PaginatedResponse<FlaggedContentResponse>>> {
    let service = ModerationService::new(state.service_context());
    let page = service.flagged_content(&actor, params).await?;
    Ok(Json(page))
}

/// POST /admin/flags/{flag_id}/resolve
pub async fn resolve_flag(
    State(state): State<AppState>,
    ModeratorUser(actor): ModeratorUser,
    IdPath(flag_id): IdPath<FlagId>,
    ValidatedJson(request): ValidatedJson<ResolveFlagRequest>,
) -> ApiResult<Json<FlagResponse>> {
    let service = ModerationService::new(state.service_context());
    let response = service.resolve_flag(&actor, flag_id, request).await?;
    Ok(Json(response))
}
