//! Reply service
//!
//! Handles reply creation, editing and soft deletion.

use forum_core::entities::{validate_reply_content, Reply, ReplyDraft};
use forum_core::error::DomainError;
use forum_core::value_objects::{Actor, ReplyId, ThreadId};
use tracing::{info, instrument};

use crate::dto::{CreateReplyRequest, ReplyResponse, UpdateReplyRequest};

use super::access::AccessService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reply service
pub struct ReplyService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReplyService<'a> {
    /// Create a new ReplyService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a reply to a thread, optionally under another reply.
    ///
    /// Lock state, parent lookup and depth are checked by the repository
    /// inside the insert transaction.
    #[instrument(skip(self, request), fields(author_id = %actor.user_id))]
    pub async fn create_reply(
        &self,
        actor: &Actor,
        thread_id: ThreadId,
        request: CreateReplyRequest,
    ) -> ServiceResult<ReplyResponse> {
        AccessService::new(self.ctx)
            .require_not_banned(actor.user_id)
            .await?;

        let draft = ReplyDraft::new(
            thread_id,
            actor.user_id,
            request.parent_reply_id.map(ReplyId::from_uuid),
            request.content,
        )?;

        let reply = self.ctx.reply_repo().create(&draft, actor).await?;

        info!(
            reply_id = %reply.id,
            thread_id = %thread_id,
            depth = reply.depth,
            "Reply created"
        );

        Ok(ReplyResponse::from(reply))
    }

    /// Replace the body of one of the actor's own replies
    #[instrument(skip(self, request))]
    pub async fn update_reply(
        &self,
        actor: &Actor,
        reply_id: ReplyId,
        request: UpdateReplyRequest,
    ) -> ServiceResult<ReplyResponse> {
        let reply = self.modifiable_reply(actor, reply_id).await?;
        validate_reply_content(&request.content)?;

        let updated = self
            .ctx
            .reply_repo()
            .update_content(reply.id, &request.content)
            .await?;

        info!(reply_id = %reply_id, "Reply updated");

        Ok(ReplyResponse::from(updated))
    }

    /// Soft delete one of the actor's own replies
    #[instrument(skip(self))]
    pub async fn delete_reply(&self, actor: &Actor, reply_id: ReplyId) -> ServiceResult<()> {
        let reply = self.modifiable_reply(actor, reply_id).await?;

        self.ctx
            .reply_repo()
            .soft_delete(reply.id, actor.user_id)
            .await?;

        info!(reply_id = %reply_id, thread_id = %reply.thread_id, "Reply deleted");

        Ok(())
    }

    /// Live reply in a live thread, authored by `actor`
    async fn modifiable_reply(&self, actor: &Actor, reply_id: ReplyId) -> ServiceResult<Reply> {
        let reply = self
            .ctx
            .reply_repo()
            .find_by_id(reply_id)
            .await?
            .ok_or(DomainError::ReplyNotFound(reply_id))?;

        // replies of a deleted thread are gone as far as callers can tell
        if self.ctx.thread_repo().find_by_id(reply.thread_id).await?.is_none() {
            return Err(DomainError::ReplyNotFound(reply_id).into());
        }

        reply.ensure_modifiable_by(actor)?;
        Ok(reply)
    }
}
