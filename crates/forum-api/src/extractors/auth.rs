//! Authentication extractors
//!
//! Verifies the bearer token and turns its claims into an [`Actor`].

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use forum_common::AppError;
use forum_core::{Actor, DomainError};

use crate::response::ApiError;
use crate::state::AppState;

/// Any authenticated caller
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::App(AppError::MissingAuth))?;

        let app_state = AppState::from_ref(state);
        let actor = app_state
            .jwt_service()
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected bearer token");
                ApiError::App(e)
            })?;

        Ok(AuthUser(actor))
    }
}

/// An authenticated caller holding the moderator capability
#[derive(Debug, Clone, Copy)]
pub struct ModeratorUser(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for ModeratorUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(actor) = AuthUser::from_request_parts(parts, state).await?;
        if !actor.is_moderator {
            return Err(ApiError::Domain(DomainError::ModeratorRequired));
        }
        Ok(ModeratorUser(actor))
    }
}
