//! # forum-api
//!
//! REST API server for threaded discussions, built with Axum.
//!
//! Reads are public; writes need a bearer token and `/api/v1/admin/*`
//! needs a token carrying the moderator capability.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{build_state, create_app, create_app_state, run, serve};
pub use state::AppState;
