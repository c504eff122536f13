//! Thread service
//!
//! Handles thread creation, listing and the full thread read with its
//! reconstructed reply tree.

use forum_core::entities::{Thread, ThreadDraft};
use forum_core::error::DomainError;
use forum_core::traits::ThreadQuery;
use forum_core::tree::{build_reply_tree, count_nodes};
use forum_core::value_objects::{Actor, ThreadId, TopicId};
use tracing::{debug, info, instrument, warn, Instrument};

use crate::dto::{
    CreateThreadRequest, ListThreadsParams, PaginatedResponse, ReplyNodeResponse,
    ThreadDetailResponse, ThreadResponse,
};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Thread service
pub struct ThreadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ThreadService<'a> {
    /// Create a new ThreadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new thread
    #[instrument(skip(self, request), fields(author_id = %actor.user_id))]
    pub async fn create_thread(
        &self,
        actor: &Actor,
        request: CreateThreadRequest,
    ) -> ServiceResult<ThreadResponse> {
        AccessService::new(self.ctx)
            .require_not_banned(actor.user_id)
            .await?;

        let thread = Thread::create(
            actor.user_id,
            ThreadDraft {
                title: request.title,
                content: request.content,
                tags: request.tags,
                topic_id: request.topic_id.map(TopicId::from_uuid),
            },
        )?;

        self.ctx.thread_repo().create(&thread).await?;

        info!(thread_id = %thread.id, "Thread created");

        Ok(ThreadResponse::from(thread))
    }

    /// List live threads, pinned first
    #[instrument(skip(self))]
    pub async fn list_threads(
        &self,
        params: ListThreadsParams,
    ) -> ServiceResult<PaginatedResponse<ThreadResponse>> {
        let search = params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let query = ThreadQuery {
            sort: params.sort,
            topic_id: params.topic_id,
            search,
            limit: params.page.limit(),
            offset: params.page.offset(),
        };

        let threads = self.ctx.thread_repo().list(&query).await?;
        let total = self.ctx.thread_repo().count(&query).await?;

        Ok(PaginatedResponse::with_total(
            threads.iter().map(ThreadResponse::from).collect(),
            params.page.page,
            params.page.per_page,
            total,
        ))
    }

    /// Fetch a thread with its reply tree and count the view.
    ///
    /// The increment runs in a detached task; the returned `view_count`
    /// includes this view. A failed increment is logged and otherwise ignored.
    #[instrument(skip(self))]
    pub async fn get_thread(&self, thread_id: ThreadId) -> ServiceResult<ThreadDetailResponse> {
        let mut thread = self
            .ctx
            .thread_repo()
            .find_by_id(thread_id)
            .await?
            .ok_or(DomainError::ThreadNotFound(thread_id))?;

        let repo = self.ctx.shared_thread_repo();
        tokio::spawn(
            async move {
                if let Err(e) = repo.increment_view_count(thread_id).await {
                    warn!(thread_id = %thread_id, error = %e, "Failed to increment view count");
                }
            }
            .in_current_span(),
        );
        thread.view_count += 1;

        let replies = self.ctx.reply_repo().find_by_thread(thread_id).await?;
        let forest = build_reply_tree(replies);
        debug!(nodes = count_nodes(&forest), "Reply tree rebuilt");

        Ok(ThreadDetailResponse {
            thread: ThreadResponse::from(thread),
            replies: forest.into_iter().map(ReplyNodeResponse::from).collect(),
        })
    }
}
