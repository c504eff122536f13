//! Service context - dependency container for services
//!
//! Holds the repositories the services talk to. Storage is reached only
//! through the repository traits, so any backend (PostgreSQL in production,
//! in-memory stores in tests) can be plugged in.

use std::sync::Arc;

use forum_core::traits::{
    BanRepository, FlagRepository, ModerationRepository, ReplyRepository, ThreadRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    thread_repo: Arc<dyn ThreadRepository>,
    reply_repo: Arc<dyn ReplyRepository>,
    moderation_repo: Arc<dyn ModerationRepository>,
    ban_repo: Arc<dyn BanRepository>,
    flag_repo: Arc<dyn FlagRepository>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        thread_repo: Arc<dyn ThreadRepository>,
        reply_repo: Arc<dyn ReplyRepository>,
        moderation_repo: Arc<dyn ModerationRepository>,
        ban_repo: Arc<dyn BanRepository>,
        flag_repo: Arc<dyn FlagRepository>,
    ) -> Self {
        Self {
            thread_repo,
            reply_repo,
            moderation_repo,
            ban_repo,
            flag_repo,
        }
    }

    /// Get the thread repository
    pub fn thread_repo(&self) -> &dyn ThreadRepository {
        self.thread_repo.as_ref()
    }

    /// Owned handle to the thread repository, for work that outlives the request
    pub(crate) fn shared_thread_repo(&self) -> Arc<dyn ThreadRepository> {
        Arc::clone(&self.thread_repo)
    }

    /// Get the reply repository
    pub fn reply_repo(&self) -> &dyn ReplyRepository {
        self.reply_repo.as_ref()
    }

    /// Get the moderation log repository
    pub fn moderation_repo(&self) -> &dyn ModerationRepository {
        self.moderation_repo.as_ref()
    }

    /// Get the ban repository
    pub fn ban_repo(&self) -> &dyn BanRepository {
        self.ban_repo.as_ref()
    }

    /// Get the content flag repository
    pub fn flag_repo(&self) -> &dyn FlagRepository {
        self.flag_repo.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    thread_repo: Option<Arc<dyn ThreadRepository>>,
    reply_repo: Option<Arc<dyn ReplyRepository>>,
    moderation_repo: Option<Arc<dyn ModerationRepository>>,
    ban_repo: Option<Arc<dyn BanRepository>>,
    flag_repo: Option<Arc<dyn FlagRepository>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thread_repo(mut self, repo: Arc<dyn ThreadRepository>) -> Self {
        self.thread_repo = Some(repo);
        self
    }

    pub fn reply_repo(mut self, repo: Arc<dyn ReplyRepository>) -> Self {
        self.reply_repo = Some(repo);
        self
    }

    pub fn moderation_repo(mut self, repo: Arc<dyn ModerationRepository>) -> Self {
        self.moderation_repo = Some(repo);
        self
    }

    pub fn ban_repo(mut self, repo: Arc<dyn BanRepository>) -> Self {
        self.ban_repo = Some(repo);
        self
    }

    pub fn flag_repo(mut self, repo: Arc<dyn FlagRepository>) -> Self {
        self.flag_repo = Some(repo);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if any repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.thread_repo
                .ok_or_else(|| ServiceError::internal("thread_repo is required"))?,
            self.reply_repo
                .ok_or_else(|| ServiceError::internal("reply_repo is required"))?,
            self.moderation_repo
                .ok_or_else(|| ServiceError::internal("moderation_repo is required"))?,
            self.ban_repo
                .ok_or_else(|| ServiceError::internal("ban_repo is required"))?,
            self.flag_repo
                .ok_or_else(|| ServiceError::internal("flag_repo is required"))?,
        ))
    }
}
