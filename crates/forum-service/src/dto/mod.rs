//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    BanUserRequest, CreateReplyRequest, CreateThreadRequest, DeleteThreadRequest,
    FlagContentRequest, FlagQueueParams, ListBansParams, ListThreadsParams, LockThreadRequest,
    ModerationLogParams, PageRequest, PinThreadRequest, ResolveFlagRequest, UnbanUserRequest,
    UpdateReplyRequest, DEFAULT_ADMIN_PER_PAGE, DEFAULT_THREADS_PER_PAGE, MAX_PER_PAGE,
};

pub use responses::{
    BanModerationResponse, BanResponse, FlagResponse, FlaggedContentResponse, HealthChecks,
    HealthResponse, ModerationActionResponse, PaginatedResponse, PaginationMeta,
    ReadinessResponse, ReplyNodeResponse, ReplyResponse, ThreadDetailResponse,
    ThreadModerationResponse, ThreadResponse,
};
