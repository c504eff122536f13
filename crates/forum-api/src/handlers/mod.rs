//! HTTP request handlers
//!
//! Thin adapters from extracted requests to the service layer.

pub mod flags;
pub mod health;
pub mod moderation;
pub mod replies;
pub mod threads;
