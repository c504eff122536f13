//! Flag handlers

use axum::{extract::State, Json};
use forum_service::dto::{FlagContentRequest, FlagResponse};
use forum_service::FlagService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Flag a thread or reply for moderator review
///
/// POST /flags
pub async fn flag_content(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ValidatedJson(request): ValidatedJson<FlagContentRequest>,
) -> ApiResult<Created<Json<FlagResponse>>> {
    let service = FlagService::new(state.service_context());
    let response = service.flag_content(&actor, request).await?;
    Ok(Created(Json(response)))
}
