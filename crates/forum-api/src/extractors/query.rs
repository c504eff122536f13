//! Query string extractors
//!
//! Turns raw listing parameters into the typed filters the services take.
//! Unknown enum values and malformed ids are rejected as
//! `INVALID_QUERY_PARAMETER`; page values are clamped instead.

use std::str::FromStr;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use forum_service::dto::{
    FlagQueueParams, ListBansParams, ListThreadsParams, ModerationLogParams, PageRequest,
    DEFAULT_ADMIN_PER_PAGE, DEFAULT_THREADS_PER_PAGE,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw `GET /threads` query
#[derive(Debug, Default, Deserialize)]
pub struct ThreadListQuery {
    pub sort: Option<String>,
    pub topic: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Raw `GET /admin/moderation-log` query
#[derive(Debug, Default, Deserialize)]
pub struct ModerationLogQuery {
    pub action: Option<String>,
    pub target_type: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Raw `GET /admin/bans` query
#[derive(Debug, Default, Deserialize)]
pub struct BanListQuery {
    pub active: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Raw `GET /admin/flagged` query
#[derive(Debug, Default, Deserialize)]
pub struct FlagQueueQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

fn parse_optional<T>(name: &str, raw: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: FromStr,
{
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ApiError::invalid_query(format!("invalid {name} '{value}'"))),
    }
}

impl TryFrom<ThreadListQuery> for ListThreadsParams {
    type Error = ApiError;

    fn try_from(query: ThreadListQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            sort: parse_optional("sort", query.sort.as_deref())?.unwrap_or_default(),
            topic_id: parse_optional("topic", query.topic.as_deref())?,
            search: query.search,
            page: PageRequest::new(query.page, query.per_page, DEFAULT_THREADS_PER_PAGE),
        })
    }
}

impl TryFrom<ModerationLogQuery> for ModerationLogParams {
    type Error = ApiError;

    fn try_from(query: ModerationLogQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            action: parse_optional("action", query.action.as_deref())?,
            target_type: parse_optional("target_type", query.target_type.as_deref())?,
            page: PageRequest::new(query.page, query.per_page, DEFAULT_ADMIN_PER_PAGE),
        })
    }
}

impl From<BanListQuery> for ListBansParams {
    fn from(query: BanListQuery) -> Self {
        Self {
            active_only: query.active.unwrap_or(true),
            page: PageRequest::new(query.page, query.per_page, DEFAULT_ADMIN_PER_PAGE),
        }
    }
}

impl TryFrom<FlagQueueQuery> for FlagQueueParams {
    type Error = ApiError;

    fn try_from(query: FlagQueueQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_optional("status", query.status.as_deref())?.unwrap_or_default(),
            page: PageRequest::new(query.page, query.per_page, DEFAULT_ADMIN_PER_PAGE),
        })
    }
}

/// Parsed listing filters of type `T`
#[derive(Debug, Clone)]
pub struct Filters<T>(pub T);

async fn raw_query<S, Q>(parts: &mut Parts, state: &S) -> Result<Q, ApiError>
where
    S: Send + Sync,
    Q: serde::de::DeserializeOwned,
{
    let Query(raw) = Query::<Q>::from_request_parts(parts, state)
        .await
        .map_err(|e| ApiError::invalid_query(e.body_text()))?;
    Ok(raw)
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Filters<ListThreadsParams> {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw: ThreadListQuery = raw_query(parts, state).await?;
        raw.try_into().map(Filters)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Filters<ModerationLogParams> {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw: ModerationLogQuery = raw_query(parts, state).await?;
        raw.try_into().map(Filters)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Filters<ListBansParams> {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw: BanListQuery = raw_query(parts, state).await?;
        Ok(Filters(raw.into()))
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Filters<FlagQueueParams> {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw: FlagQueueQuery = raw_query(parts, state).await?;
        raw.try_into().map(Filters)
    }
}
