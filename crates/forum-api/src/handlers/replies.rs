//! Reply handlers

use axum::{extract::State, Json};
use forum_core::{ReplyId, ThreadId};
use forum_service::dto::{CreateReplyRequest, ReplyResponse, UpdateReplyRequest};
use forum_service::ReplyService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create reply, at the root of the thread or under `parent_reply_id`
///
/// POST /threads/{thread_id}/replies
pub async fn create_reply(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    IdPath(thread_id): IdPath<ThreadId>,
    ValidatedJson(request): ValidatedJson<CreateReplyRequest>,
) -> ApiResult<Created<Json<ReplyResponse>>> {
    let service = ReplyService::new(state.service_context());
    let response = service.create_reply(&actor, thread_id, request).await?;
    Ok(Created(Json(response)))
}

/// Edit own reply
///
/// PATCH /replies/{reply_id}
pub async fn update_reply(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    IdPath(reply_id): IdPath<ReplyId>,
    ValidatedJson(request): ValidatedJson<UpdateReplyRequest>,
) -> ApiResult<Json<ReplyResponse>> {
    let service = ReplyService::new(state.service_context());
    let response = service.update_reply(&actor, reply_id, request).await?;
    Ok(Json(response))
}

/// Soft delete own reply
///
/// DELETE /replies/{reply_id}
pub async fn delete_reply(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    IdPath(reply_id): IdPath<ReplyId>,
) -> ApiResult<NoContent> {
    let service = ReplyService::new(state.service_context());
    service.delete_reply(&actor, reply_id).await?;
    Ok(NoContent)
}
