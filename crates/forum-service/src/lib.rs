//! # forum-service
//!
//! Application layer: thread, reply, flag and moderation use cases on top of the
//! repository ports, plus the request/response DTOs the HTTP layer speaks.

pub mod dto;
pub mod services;

pub use services::{
    AccessService, FlagService, ModerationService, ReplyService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ThreadService,
};
