//! Route definitions
//!
//! Discussion and moderation routes are mounted under /api/v1; health probes
//! sit at the root.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{flags, health, moderation, replies, threads};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(thread_routes())
        .merge(reply_routes())
        .route("/flags", post(flags::flag_content))
        .nest("/admin", admin_routes())
}

fn thread_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/threads",
            get(threads::list_threads).post(threads::create_thread),
        )
        .route("/threads/:thread_id", get(threads::get_thread))
        .route("/threads/:thread_id/replies", post(replies::create_reply))
}

fn reply_routes() -> Router<AppState> {
    Router::new().route(
        "/replies/:reply_id",
        patch(replies::update_reply).delete(replies::delete_reply),
    )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/threads/:thread_id/lock", post(moderation::lock_thread))
        .route("/threads/:thread_id/pin", post(moderation::pin_thread))
        .route("/threads/:thread_id/delete", post(moderation::delete_thread))
        .route("/users/:user_id/ban", post(moderation::ban_user))
        .route("/users/:user_id/unban", post(moderation::unban_user))
        .route("/moderation-log", get(moderation::moderation_log))
        .route("/bans", get(moderation::list_bans))
        .route("/flagged", get(moderation::flagged_content))
        .route("/flags/:flag_id/resolve", post(moderation::resolve_flag))
}
