//! In-memory repositories for service tests.
//!
//! One `Mutex` guards the whole store and every trait method takes it once,
//! so each call is atomic the way a database transaction is.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use forum_core::entities::{
    ContentFlag, FlagStatus, FlaggedContent, ModerationAction, ModerationDetail, Reply, ReplyDraft,
    TargetKind, Thread, UserBan,
};
use forum_core::error::DomainError;
use forum_core::traits::{
    BanQuery, BanRepository, FlagQuery, FlagRepository, ModerationQuery, ModerationRepository,
    RepoResult, ReplyRepository, ThreadQuery, ThreadRepository,
};
use forum_core::value_objects::{
    Actor, Deletion, FlagId, ReplyId, ReplyPlacement, ThreadId, ThreadSort, UserId,
};
use forum_service::ServiceContext;

/// Let detached tasks spawned by the service run to completion
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[derive(Default)]
struct State {
    threads: HashMap<ThreadId, Thread>,
    replies: HashMap<ReplyId, Reply>,
    actions: Vec<ModerationAction>,
    bans: Vec<UserBan>,
    flags: Vec<ContentFlag>,
    users: HashSet<UserId>,
}

impl State {
    /// Title and body of a live flag target
    fn target_text(&self, kind: TargetKind, id: uuid::Uuid) -> Option<(Option<String>, String)> {
        match kind {
            TargetKind::Thread => self
                .threads
                .get(&ThreadId::from_uuid(id))
                .filter(|t| !t.is_deleted())
                .map(|t| (Some(t.title.clone()), t.content.clone())),
            TargetKind::Reply => self
                .replies
                .get(&ReplyId::from_uuid(id))
                .filter(|r| !r.is_deleted())
                .filter(|r| self.threads.get(&r.thread_id).is_some_and(|t| !t.is_deleted()))
                .map(|r| (None, r.content.clone())),
            TargetKind::User => None,
        }
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    fail_view_increments: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a user so it can be banned
    pub fn seed_user(&self) -> UserId {
        let id = UserId::generate();
        self.state.lock().users.insert(id);
        id
    }

    pub fn fail_view_increments(&self) {
        self.fail_view_increments.store(true, Ordering::SeqCst);
    }

    pub fn action_count(&self) -> usize {
        self.state.lock().actions.len()
    }

    pub fn stored_thread(&self, id: ThreadId) -> Option<Thread> {
        self.state.lock().threads.get(&id).cloned()
    }

    pub fn stored_reply(&self, id: ReplyId) -> Option<Reply> {
        self.state.lock().replies.get(&id).cloned()
    }
}

/// Service context backed by one shared in-memory store
pub fn context(store: &Arc<InMemoryStore>) -> ServiceContext {
    ServiceContext::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    )
}

fn page<T>(items: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(usize::try_from(offset.max(0)).unwrap_or(0))
        .take(usize::try_from(limit.clamp(1, 100)).unwrap_or(100))
        .collect()
}

fn matches_query(thread: &Thread, query: &ThreadQuery) -> bool {
    if thread.is_deleted() {
        return false;
    }
    if query.topic_id.is_some() && thread.topic_id != query.topic_id {
        return false;
    }
    match &query.search {
        Some(term) => {
            let term = term.to_lowercase();
            thread.title.to_lowercase().contains(&term) || thread.content.to_lowercase().contains(&term)
        }
        None => true,
    }
}

#[async_trait]
impl ThreadRepository for InMemoryStore {
    async fn find_by_id(&self, id: ThreadId) -> RepoResult<Option<Thread>> {
        let state = self.state.lock();
        Ok(state.threads.get(&id).filter(|t| !t.is_deleted()).cloned())
    }

    async fn list(&self, query: &ThreadQuery) -> RepoResult<Vec<Thread>> {
        let state = self.state.lock();
        let mut threads: Vec<Thread> = state
            .threads
            .values()
            .filter(|t| matches_query(t, query))
            .cloned()
            .collect();

        threads.sort_by(|a, b| {
            let by_sort = match query.sort {
                ThreadSort::Recent => b.last_activity_at.cmp(&a.last_activity_at),
                ThreadSort::Popular => b
                    .view_count
                    .cmp(&a.view_count)
                    .then(b.last_activity_at.cmp(&a.last_activity_at)),
                ThreadSort::MostReplies => b
                    .reply_count
                    .cmp(&a.reply_count)
                    .then(b.last_activity_at.cmp(&a.last_activity_at)),
            };
            b.pinned.cmp(&a.pinned).then(by_sort).then(b.id.cmp(&a.id))
        });

        Ok(page(threads, query.limit, query.offset))
    }

    async fn count(&self, query: &ThreadQuery) -> RepoResult<i64> {
        let state = self.state.lock();
        Ok(state.threads.values().filter(|t| matches_query(t, query)).count() as i64)
    }

    async fn create(&self, thread: &Thread) -> RepoResult<()> {
        self.state.lock().threads.insert(thread.id, thread.clone());
        Ok(())
    }

    async fn increment_view_count(&self, id: ThreadId) -> RepoResult<()> {
        if self.fail_view_increments.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection reset".to_string()));
        }
        let mut state = self.state.lock();
        match state.threads.get_mut(&id).filter(|t| !t.is_deleted()) {
            Some(thread) => {
                thread.view_count += 1;
                Ok(())
            }
            None => Err(DomainError::ThreadNotFound(id)),
        }
    }
}

#[async_trait]
impl ReplyRepository for InMemoryStore {
    async fn find_by_id(&self, id: ReplyId) -> RepoResult<Option<Reply>> {
        Ok(self.state.lock().replies.get(&id).cloned())
    }

    async fn find_by_thread(&self, thread_id: ThreadId) -> RepoResult<Vec<Reply>> {
        let state = self.state.lock();
        let mut replies: Vec<Reply> = state
            .replies
            .values()
            .filter(|r| r.thread_id == thread_id)
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(replies)
    }

    async fn find_children(&self, parent_id: ReplyId) -> RepoResult<Vec<Reply>> {
        let state = self.state.lock();
        let mut replies: Vec<Reply> = state
            .replies
            .values()
            .filter(|r| r.parent_id == Some(parent_id) && !r.is_deleted())
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(replies)
    }

    async fn create(&self, draft: &ReplyDraft, actor: &Actor) -> RepoResult<Reply> {
        let mut state = self.state.lock();

        let thread = state
            .threads
            .get(&draft.thread_id)
            .ok_or(DomainError::ThreadNotFound(draft.thread_id))?;
        thread.ensure_accepts_replies(actor)?;

        let placement = match draft.parent_id {
            None => ReplyPlacement::root(draft.id),
            Some(parent_id) => state
                .replies
                .get(&parent_id)
                .filter(|p| p.thread_id == draft.thread_id)
                .ok_or(DomainError::ParentReplyNotFound(parent_id))?
                .place_child(draft.id)?,
        };

        let reply = draft.clone().place(placement);
        state.replies.insert(reply.id, reply.clone());

        if let Some(thread) = state.threads.get_mut(&draft.thread_id) {
            thread.reply_count += 1;
            thread.last_activity_at = reply.created_at;
        }

        Ok(reply)
    }

    async fn update_content(&self, id: ReplyId, content: &str) -> RepoResult<Reply> {
        let mut state = self.state.lock();
        let reply = state
            .replies
            .get_mut(&id)
            .filter(|r| !r.is_deleted())
            .ok_or(DomainError::ReplyNotFound(id))?;
        reply.edit(content.to_string());
        Ok(reply.clone())
    }

    async fn soft_delete(&self, id: ReplyId, by: UserId) -> RepoResult<()> {
        let mut state = self.state.lock();
        let reply = state
            .replies
            .get_mut(&id)
            .filter(|r| !r.is_deleted())
            .ok_or(DomainError::ReplyNotFound(id))?;
        reply.deletion = Deletion::now(by);
        reply.updated_at = Utc::now();
        let thread_id = reply.thread_id;

        if let Some(thread) = state.threads.get_mut(&thread_id) {
            thread.reply_count = (thread.reply_count - 1).max(0);
        }
        Ok(())
    }
}

#[async_trait]
impl ModerationRepository for InMemoryStore {
    async fn apply_thread_action(&self, action: &ModerationAction) -> RepoResult<Thread> {
        let thread_id = action
            .detail
            .thread_id()
            .ok_or_else(|| DomainError::InternalError("not a thread action".to_string()))?;

        let mut state = self.state.lock();
        let thread = state
            .threads
            .get_mut(&thread_id)
            .filter(|t| !t.is_deleted())
            .ok_or(DomainError::ThreadNotFound(thread_id))?;

        match action.detail {
            ModerationDetail::LockThread { .. } => thread.set_locked(true),
            ModerationDetail::UnlockThread { .. } => thread.set_locked(false),
            ModerationDetail::PinThread { .. } => thread.set_pinned(true),
            ModerationDetail::UnpinThread { .. } => thread.set_pinned(false),
            ModerationDetail::DeleteThread { .. } => thread.mark_deleted(action.moderator_id),
            ModerationDetail::BanUser { .. } | ModerationDetail::UnbanUser { .. } => {
                return Err(DomainError::InternalError("not a thread action".to_string()))
            }
        }
        let thread = thread.clone();

        state.actions.push(action.clone());
        Ok(thread)
    }

    async fn list_actions(&self, query: &ModerationQuery) -> RepoResult<Vec<ModerationAction>> {
        let state = self.state.lock();
        let actions: Vec<ModerationAction> = state
            .actions
            .iter()
            .rev()
            .filter(|a| query.action.map_or(true, |kind| a.action_type() == kind))
            .filter(|a| {
                query
                    .target_type
                    .map_or(true, |kind| a.action_type().target_kind() == kind)
            })
            .cloned()
            .collect();
        Ok(page(actions, query.limit, query.offset))
    }
}

#[async_trait]
impl BanRepository for InMemoryStore {
    async fn find_active_ban(&self, user_id: UserId) -> RepoResult<Option<UserBan>> {
        let state = self.state.lock();
        Ok(state
            .bans
            .iter()
            .rev()
            .find(|b| b.user_id == user_id && b.is_active())
            .cloned())
    }

    async fn ban_user(&self, ban: &UserBan, action: &ModerationAction) -> RepoResult<()> {
        let mut state = self.state.lock();
        if !state.users.contains(&ban.user_id) {
            return Err(DomainError::UserNotFound(ban.user_id));
        }
        if state.bans.iter().any(|b| b.user_id == ban.user_id && b.is_active()) {
            return Err(DomainError::AlreadyBanned);
        }
        state.bans.push(ban.clone());
        state.actions.push(action.clone());
        Ok(())
    }

    async fn unban_user(&self, user_id: UserId, action: &ModerationAction) -> RepoResult<UserBan> {
        let mut state = self.state.lock();
        if !state.users.contains(&user_id) {
            return Err(DomainError::UserNotFound(user_id));
        }
        let ban = state
            .bans
            .iter_mut()
            .rev()
            .find(|b| b.user_id == user_id && b.is_active())
            .ok_or(DomainError::NotBanned)?;
        ban.active = false;
        let ban = ban.clone();

        state.actions.push(action.clone());
        Ok(ban)
    }

    async fn list_bans(&self, query: &BanQuery) -> RepoResult<Vec<UserBan>> {
        let state = self.state.lock();
        let bans: Vec<UserBan> = state
            .bans
            .iter()
            .rev()
            .filter(|b| !query.active_only || b.is_active())
            .cloned()
            .collect();
        Ok(page(bans, query.limit, query.offset))
    }
}

#[async_trait]
impl FlagRepository for InMemoryStore {
    async fn create_flag(&self, flag: &ContentFlag) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.target_text(flag.target_type, flag.target_id).is_none() {
            return Err(match flag.target_type {
                TargetKind::Reply => DomainError::ReplyNotFound(ReplyId::from_uuid(flag.target_id)),
                _ => DomainError::ThreadNotFound(ThreadId::from_uuid(flag.target_id)),
            });
        }
        let duplicate = state.flags.iter().any(|f| {
            f.status == FlagStatus::Pending
                && f.reporter_id == flag.reporter_id
                && f.target_type == flag.target_type
                && f.target_id == flag.target_id
        });
        if duplicate {
            return Err(DomainError::AlreadyFlagged);
        }
        state.flags.push(flag.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: FlagId) -> RepoResult<Option<ContentFlag>> {
        Ok(self.state.lock().flags.iter().find(|f| f.id == id).cloned())
    }

    async fn resolve_flag(
        &self,
        id: FlagId,
        status: FlagStatus,
        moderator_id: UserId,
    ) -> RepoResult<ContentFlag> {
        let mut state = self.state.lock();
        let flag = state
            .flags
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(DomainError::FlagNotFound(id))?;
        flag.resolve(moderator_id, status)?;
        Ok(flag.clone())
    }

    async fn list_flags(&self, query: &FlagQuery) -> RepoResult<Vec<FlaggedContent>> {
        let state = self.state.lock();
        let items: Vec<FlaggedContent> = state
            .flags
            .iter()
            .rev()
            .filter(|f| f.status == query.status)
            .map(|f| {
                let target = state.target_text(f.target_type, f.target_id);
                FlaggedContent {
                    flag: f.clone(),
                    title: target.as_ref().and_then(|(title, _)| title.clone()),
                    content: target.map(|(_, content)| content),
                    flag_count: state
                        .flags
                        .iter()
                        .filter(|o| o.target_type == f.target_type && o.target_id == f.target_id)
                        .count() as i64,
                }
            })
            .collect();
        Ok(page(items, query.limit, query.offset))
    }
}
