//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;

use axum::Router;
use forum_common::{AppConfig, AppError, JwtService};
use forum_db::{
    create_pool, run_migrations, PgBanRepository, PgFlagRepository, PgModerationRepository,
    PgPool, PgReplyRepository, PgThreadRepository, PoolConfig,
};
use forum_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = apply_middleware(create_router(), state.config());
    router.with_state(state)
}

/// Connect to PostgreSQL, apply migrations when enabled, and wire the state
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    build_state(pool, config)
}

/// Wire repositories, services and token verification over an existing pool
pub fn build_state(pool: PgPool, config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

    let service_context = ServiceContextBuilder::new()
        .thread_repo(Arc::new(PgThreadRepository::new(pool.clone())))
        .reply_repo(Arc::new(PgReplyRepository::new(pool.clone())))
        .moderation_repo(Arc::new(PgModerationRepository::new(pool.clone())))
        .ban_repo(Arc::new(PgBanRepository::new(pool.clone())))
        .flag_repo(Arc::new(PgFlagRepository::new(pool.clone())))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, jwt_service, config, pool))
}

/// Serve `app` on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}
