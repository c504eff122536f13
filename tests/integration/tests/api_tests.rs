//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL (JWT_SECRET optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

async fn create_thread(server: &TestServer, token: &str, title: &str) -> ThreadBody {
    let response = server
        .post_auth("/api/v1/threads", token, &thread_body(title))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn create_reply(
    server: &TestServer,
    token: &str,
    thread_id: Uuid,
    content: &str,
    parent: Option<Uuid>,
) -> ReplyBody {
    let response = server
        .post_auth(
            &format!("/api/v1/threads/{thread_id}/replies"),
            token,
            &reply_body(content, parent),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn fetch_thread(server: &TestServer, thread_id: Uuid) -> ThreadDetailBody {
    let response = server
        .get(&format!("/api/v1/threads/{thread_id}"))
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_returned() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

// ============================================================================
// Auth and Input Tests
// ============================================================================

#[tokio::test]
async fn test_writes_require_a_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server
        .post("/api/v1/threads", &thread_body("No token here"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "MISSING_AUTHORIZATION");

    let response = server
        .post_auth("/api/v1/threads", "not.a.jwt", &thread_body("Bad token"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_thread_validation_names_the_field() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();

    let response = server
        .post_auth(
            "/api/v1/threads",
            &author.token,
            &json!({ "title": "ab", "content": "Twenty characters ok" }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["title"].is_array());

    let response = server
        .post_auth(
            "/api/v1/threads",
            &author.token,
            &json!({
                "title": "Too many tags",
                "content": "Twenty characters ok",
                "tags": ["a", "b", "c", "d", "e", "f"],
            }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body["error"]["details"]["tags"].is_array());
}

#[tokio::test]
async fn test_malformed_input_codes() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();

    let response = server
        .post_raw("/api/v1/threads", &author.token, "{\"title\": ")
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_BODY");

    let response = server.get("/api/v1/threads/not-a-uuid").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");

    let response = server.get("/api/v1/threads?sort=hottest").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");

    let response = server.get("/api/v1/threads?topic=nope").await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");
}

// ============================================================================
// Thread Tests
// ============================================================================

#[tokio::test]
async fn test_get_unknown_thread() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server
        .get(&format!("/api/v1/threads/{}", Uuid::now_v7()))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_THREAD");
}

#[tokio::test]
async fn test_list_threads_by_topic() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let topic = Uuid::new_v4();

    for title in ["First in topic", "Second in topic", "Third in topic"] {
        let response = server
            .post_auth("/api/v1/threads", &author.token, &thread_in_topic(title, topic))
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get(&format!("/api/v1/threads?topic={topic}&per_page=2"))
        .await
        .unwrap();
    let page: Page<ThreadBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.total, Some(3));
    assert!(page.pagination.has_more);
    assert_eq!(page.data[0].title, "Third in topic");

    let response = server
        .get(&format!("/api/v1/threads?topic={topic}&page=2&per_page=2"))
        .await
        .unwrap();
    let page: Page<ThreadBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.pagination.page, 2);
    assert!(!page.pagination.has_more);
}

#[tokio::test]
async fn test_fetch_counts_views() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let thread = create_thread(&server, &author.token, "Counting views").await;

    let first = fetch_thread(&server, thread.id).await;
    assert_eq!(first.thread.view_count, 1);
    assert_eq!(server.wait_for_view_count(thread.id, 1).await.unwrap(), 1);

    let second = fetch_thread(&server, thread.id).await;
    assert_eq!(second.thread.view_count, 2);
    assert_eq!(server.wait_for_view_count(thread.id, 2).await.unwrap(), 2);
}

// ============================================================================
// Reply Tree Tests
// ============================================================================

#[tokio::test]
async fn test_reply_forest_order() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let thread = create_thread(&server, &author.token, "Best plays of the week").await;

    let r1 = create_reply(&server, &author.token, thread.id, "R1", None).await;
    let r2 = create_reply(&server, &author.token, thread.id, "R2", Some(r1.id)).await;
    let r3 = create_reply(&server, &author.token, thread.id, "R3", None).await;

    assert_eq!(r1.depth, 0);
    assert_eq!(r2.depth, 1);
    assert_eq!(r2.parent_reply_id, Some(r1.id));
    assert!(r2.path.starts_with(&format!("{}.", r1.path)));
    assert_eq!(r3.depth, 0);

    let detail = fetch_thread(&server, thread.id).await;
    assert_eq!(detail.thread.reply_count, 3);
    let roots: Vec<Uuid> = detail.replies.iter().map(|n| n.id).collect();
    assert_eq!(roots, vec![r1.id, r3.id]);
    assert_eq!(detail.replies[0].replies.len(), 1);
    assert_eq!(detail.replies[0].replies[0].id, r2.id);
    assert!(detail.replies[1].replies.is_empty());
}

#[tokio::test]
async fn test_depth_limit() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let thread = create_thread(&server, &author.token, "Deep nesting").await;

    let mut parent = create_reply(&server, &author.token, thread.id, "depth 0", None).await;
    for depth in 1..=10 {
        parent = create_reply(
            &server,
            &author.token,
            thread.id,
            &format!("depth {depth}"),
            Some(parent.id),
        )
        .await;
        assert_eq!(parent.depth, depth);
    }

    let response = server
        .post_auth(
            &format!("/api/v1/threads/{}/replies", thread.id),
            &author.token,
            &reply_body("too deep", Some(parent.id)),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "MAX_DEPTH_EXCEEDED");
    assert_eq!(body["error"]["details"]["field"], "parent_reply_id");
}

#[tokio::test]
async fn test_parent_must_belong_to_thread() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let first = create_thread(&server, &author.token, "First thread").await;
    let second = create_thread(&server, &author.token, "Second thread").await;
    let foreign = create_reply(&server, &author.token, first.id, "elsewhere", None).await;

    let response = server
        .post_auth(
            &format!("/api/v1/threads/{}/replies", second.id),
            &author.token,
            &reply_body("cross thread", Some(foreign.id)),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_PARENT_REPLY");
}

#[tokio::test]
async fn test_concurrent_replies_get_distinct_paths() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let thread = create_thread(&server, &author.token, "Busy thread").await;
    let parent = create_reply(&server, &author.token, thread.id, "parent", None).await;

    let srv = &server;
    let token = author.token.as_str();
    let (thread_id, parent_id) = (thread.id, parent.id);
    let replies = join_all((0..12).map(|i| async move {
        create_reply(srv, token, thread_id, &format!("child {i}"), Some(parent_id)).await
    }))
    .await;

    let mut paths: Vec<&str> = replies.iter().map(|r| r.path.as_str()).collect();
    paths.sort_unstable();
    paths.dedup();
    assert_eq!(paths.len(), 12);
    assert!(replies.iter().all(|r| r.depth == parent.depth + 1));

    let detail = fetch_thread(&server, thread.id).await;
    assert_eq!(detail.thread.reply_count, 13);
    assert_eq!(detail.replies[0].replies.len(), 12);
}

#[tokio::test]
async fn test_deleted_parent_becomes_placeholder() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let thread = create_thread(&server, &author.token, "Placeholder policy").await;
    let r1 = create_reply(&server, &author.token, thread.id, "R1", None).await;
    let r2 = create_reply(&server, &author.token, thread.id, "R2", Some(r1.id)).await;
    let leaf = create_reply(&server, &author.token, thread.id, "leaf", None).await;

    for id in [r1.id, leaf.id] {
        let response = server
            .delete_auth(&format!("/api/v1/replies/{id}"), &author.token)
            .await
            .unwrap();
        assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    }

    let detail = fetch_thread(&server, thread.id).await;
    assert_eq!(detail.thread.reply_count, 1);
    assert_eq!(detail.replies.len(), 1);

    let placeholder = &detail.replies[0];
    assert_eq!(placeholder.id, r1.id);
    assert!(placeholder.deleted);
    assert!(placeholder.content.is_none());
    assert!(placeholder.author_id.is_none());
    assert_eq!(placeholder.replies[0].id, r2.id);
    assert_eq!(placeholder.replies[0].content.as_deref(), Some("R2"));
}

#[tokio::test]
async fn test_only_author_modifies_reply() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let other = server.member().await.unwrap();
    let thread = create_thread(&server, &author.token, "Ownership").await;
    let reply = create_reply(&server, &author.token, thread.id, "mine", None).await;
    let path = format!("/api/v1/replies/{}", reply.id);

    let response = server
        .patch_auth(&path, &other.token, &json!({ "content": "hijacked" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_REPLY_AUTHOR");

    let response = server.delete_auth(&path, &other.token).await.unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "NOT_REPLY_AUTHOR");

    let response = server
        .patch_auth(&path, &author.token, &json!({ "content": "edited" }))
        .await
        .unwrap();
    let edited: ReplyBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.content, "edited");
    assert_eq!(edited.path, reply.path);

    let response = server.delete_auth(&path, &author.token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &author.token).await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_REPLY");
}

// ============================================================================
// Moderation Tests
// ============================================================================

#[tokio::test]
async fn test_locked_thread_rejects_members_only() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let moderator = server.moderator().await.unwrap();
    let thread = create_thread(&server, &author.token, "Heated debate").await;
    let lock_path = format!("/api/v1/admin/threads/{}/lock", thread.id);

    let response = server
        .post_auth(&lock_path, &moderator.token, &json!({ "locked": true, "reason": "cool down" }))
        .await
        .unwrap();
    let locked: ThreadModerationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(locked.locked);
    assert_eq!(locked.action.action_type, "lock_thread");
    assert_eq!(locked.action.target_id, thread.id);

    // locking again is accepted and logged again
    let response = server
        .post_auth(&lock_path, &moderator.token, &json!({ "locked": true }))
        .await
        .unwrap();
    let relocked: ThreadModerationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(relocked.locked);
    assert_ne!(relocked.action.id, locked.action.id);

    let response = server
        .post_auth(
            &format!("/api/v1/threads/{}/replies", thread.id),
            &author.token,
            &reply_body("let me in", None),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "THREAD_LOCKED");

    create_reply(&server, &moderator.token, thread.id, "moderator note", None).await;
    let detail = fetch_thread(&server, thread.id).await;
    assert_eq!(detail.thread.reply_count, 1);
    assert!(detail.thread.locked);

    let response = server
        .get_auth("/api/v1/admin/moderation-log?action=lock_thread&per_page=100", &moderator.token)
        .await
        .unwrap();
    let log: Page<ActionBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let entries = log.data.iter().filter(|a| a.target_id == thread.id).count();
    assert_eq!(entries, 2);
}

#[tokio::test]
async fn test_admin_routes_need_moderator() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let member = server.member().await.unwrap();
    let thread = create_thread(&server, &member.token, "Not yours to lock").await;

    let response = server
        .post_auth(
            &format!("/api/v1/admin/threads/{}/lock", thread.id),
            &member.token,
            &json!({ "locked": true }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "MODERATOR_REQUIRED");

    let response = server
        .get_auth("/api/v1/admin/moderation-log", &member.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "MODERATOR_REQUIRED");
}

#[tokio::test]
async fn test_pin_and_delete_thread() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let moderator = server.moderator().await.unwrap();
    let thread = create_thread(&server, &author.token, "Weekly roundup").await;

    let response = server
        .post_auth(
            &format!("/api/v1/admin/threads/{}/pin", thread.id),
            &moderator.token,
            &json!({ "pinned": true }),
        )
        .await
        .unwrap();
    let pinned: ThreadModerationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(pinned.pinned);
    assert_eq!(pinned.action.action_type, "pin_thread");

    let delete_path = format!("/api/v1/admin/threads/{}/delete", thread.id);
    let response = server
        .post_auth(&delete_path, &moderator.token, &json!({ "reason": "" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server
        .post_auth(&delete_path, &moderator.token, &json!({ "reason": "spam" }))
        .await
        .unwrap();
    let deleted: ThreadModerationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(deleted.deleted);
    assert_eq!(deleted.action.reason.as_deref(), Some("spam"));

    let response = server
        .get(&format!("/api/v1/threads/{}", thread.id))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_THREAD");
}

#[tokio::test]
async fn test_ban_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let moderator = server.moderator().await.unwrap();
    let target = server.member().await.unwrap();
    let ban_path = format!("/api/v1/admin/users/{}/ban", target.id);
    let unban_path = format!("/api/v1/admin/users/{}/unban", target.id);

    let response = server
        .post_auth(
            &ban_path,
            &moderator.token,
            &json!({ "reason": "repeated abuse", "duration_days": 7 }),
        )
        .await
        .unwrap();
    let banned: BanModerationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(banned.ban.active);
    assert!(!banned.ban.permanent);
    assert_eq!(banned.action.action_type, "ban_user");
    assert_eq!(banned.action.target_type, "user");

    let response = server
        .post_auth("/api/v1/threads", &target.token, &thread_body("Banned author"))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "USER_BANNED");

    let response = server
        .post_auth(&ban_path, &moderator.token, &json!({ "reason": "again" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "USER_ALREADY_BANNED");

    let response = server
        .get_auth("/api/v1/admin/bans?per_page=100", &moderator.token)
        .await
        .unwrap();
    let active: Page<BanBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(active.data.iter().any(|b| b.id == banned.ban.id));

    let response = server.post_empty(&unban_path, &moderator.token).await.unwrap();
    let lifted: BanModerationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!lifted.ban.active);
    assert_eq!(lifted.ban.id, banned.ban.id);
    assert_eq!(lifted.action.action_type, "unban_user");

    let response = server.post_empty(&unban_path, &moderator.token).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "USER_NOT_BANNED");

    create_thread(&server, &target.token, "Welcome back").await;
}

#[tokio::test]
async fn test_ban_rules() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let moderator = server.moderator().await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/admin/users/{}/ban", moderator.id),
            &moderator.token,
            &json!({ "reason": "testing" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "CANNOT_BAN_SELF");

    let response = server
        .post_auth(
            &format!("/api/v1/admin/users/{}/ban", Uuid::now_v7()),
            &moderator.token,
            &json!({ "reason": "ghost" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_USER");

    let target = server.member().await.unwrap();
    let response = server
        .post_auth(
            &format!("/api/v1/admin/users/{}/ban", target.id),
            &moderator.token,
            &json!({ "reason": "too long", "duration_days": 36_501 }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server
        .post_auth(
            &format!("/api/v1/admin/users/{}/ban", target.id),
            &moderator.token,
            &json!({ "reason": "for good" }),
        )
        .await
        .unwrap();
    let banned: BanModerationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(banned.ban.permanent);
}

#[tokio::test]
async fn test_moderation_log_rejects_unknown_filters() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let moderator = server.moderator().await.unwrap();

    let response = server
        .get_auth("/api/v1/admin/moderation-log?action=nuke", &moderator.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");

    let response = server
        .get_auth("/api/v1/admin/moderation-log?target_type=thread", &moderator.token)
        .await
        .unwrap();
    let log: Page<ActionBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(log.data.iter().all(|a| a.target_type == "thread"));
    assert!(log.pagination.total.is_none());
    assert_eq!(log.pagination.per_page, 50);
}

// ============================================================================
// Flag Queue Tests
// ============================================================================

#[tokio::test]
async fn test_flag_queue_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let author = server.member().await.unwrap();
    let reporter = server.member().await.unwrap();
    let moderator = server.moderator().await.unwrap();

    let thread = create_thread(&server, &author.token, "Flag me").await;
    let reply = create_reply(&server, &author.token, thread.id, "cheap watches", None).await;

    let response = server
        .post_auth("/api/v1/flags", &reporter.token, &flag_body("reply", reply.id))
        .await
        .unwrap();
    let flag: FlagBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(flag.status, "pending");
    assert_eq!(flag.target_type, "reply");
    assert_eq!(flag.reporter_id, reporter.id.into_inner());

    let response = server
        .post_auth("/api/v1/flags", &reporter.token, &flag_body("reply", reply.id))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_FLAGGED");

    let response = server
        .get_auth("/api/v1/admin/flagged", &reporter.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(code, "MODERATOR_REQUIRED");

    let response = server
        .get_auth("/api/v1/admin/flagged?per_page=100", &moderator.token)
        .await
        .unwrap();
    let pending: Page<FlaggedBody> = assert_json(response, StatusCode::OK).await.unwrap();
    let entry = pending
        .data
        .iter()
        .find(|f| f.flag.id == flag.id)
        .expect("new flag is queued");
    assert_eq!(entry.content.as_deref(), Some("cheap watches"));
    assert!(entry.title.is_none());
    assert_eq!(entry.flag_count, 1);
    assert!(pending.pagination.total.is_none());

    let resolve_path = format!("/api/v1/admin/flags/{}/resolve", flag.id);
    let response = server
        .post_auth(&resolve_path, &moderator.token, &json!({ "status": "dismissed" }))
        .await
        .unwrap();
    let resolved: FlagBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(resolved.status, "dismissed");
    assert_eq!(resolved.reviewed_by, Some(moderator.id.into_inner()));

    let response = server
        .post_auth(&resolve_path, &moderator.token, &json!({ "status": "reviewed" }))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "FLAG_ALREADY_RESOLVED");

    let response = server
        .get_auth("/api/v1/admin/flagged?status=dismissed&per_page=100", &moderator.token)
        .await
        .unwrap();
    let dismissed: Page<FlaggedBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(dismissed.data.iter().any(|f| f.flag.id == flag.id));
    assert!(dismissed.data.iter().all(|f| f.flag.status == "dismissed"));
}

#[tokio::test]
async fn test_flag_queue_input_errors() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let reporter = server.member().await.unwrap();
    let moderator = server.moderator().await.unwrap();

    let response = server
        .get_auth("/api/v1/admin/flagged?status=open", &moderator.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_QUERY_PARAMETER");

    let response = server
        .post_auth("/api/v1/flags", &reporter.token, &flag_body("thread", Uuid::now_v7()))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_THREAD");

    let response = server
        .post_auth(
            &format!("/api/v1/admin/flags/{}/resolve", Uuid::now_v7()),
            &moderator.token,
            &json!({ "status": "pending" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let response = server
        .post_auth(
            &format!("/api/v1/admin/flags/{}/resolve", Uuid::now_v7()),
            &moderator.token,
            &json!({ "status": "reviewed" }),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_FLAG");
}
