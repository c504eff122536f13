//! Thread handlers

use axum::{extract::State, Json};
use forum_core::ThreadId;
use forum_service::dto::{
    CreateThreadRequest, ListThreadsParams, PaginatedResponse, ThreadDetailResponse,
    ThreadResponse,
};
use forum_service::ThreadService;

use crate::extractors::{AuthUser, Filters, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List threads
///
/// GET /threads?sort=&topic=&search=&page=&per_page=
pub async fn list_threads(
    State(state): State<AppState>,
    Filters(params): Filters<ListThreadsParams>,
) -> ApiResult<Json<PaginatedResponse<ThreadResponse>>> {
    let service = ThreadService::new(state.service_context());
    let page = service.list_threads(params).await?;
    Ok(Json(page))
}

/// Create thread
///
/// POST /threads
pub async fn create_thread(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedJson(request): ValidatedJson<CreateThreadRequest>,
) -> ApiResult<Created<Json<ThreadResponse>>> {
    let service = ThreadService::new(state.service_context());
    let response = service.create_thread(&actor, request).await?;
    Ok(Created(Json(response)))
}

/// Get a thread with its reply tree
///
/// GET /threads/{thread_id}
pub async fn get_thread(
    State(state): State<AppState>,
    IdPath(thread_id): IdPath<ThreadId>,
) -> ApiResult<Json<ThreadDetailResponse>> {
    let service = ThreadService::new(state.service_context());
    let response = service.get_thread(thread_id).await?;
    Ok(Json(response))
}
