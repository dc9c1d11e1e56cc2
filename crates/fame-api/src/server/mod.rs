//! Server setup and initialization
//!
//! Wires configuration, storage and services into the Axum application and runs it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use fame_common::{AppConfig, AppError, JwtService};
use fame_db::{
    create_pool, run_migrations, PgApplicationRepository, PgMemberRepository, PgUserRepository,
};
use fame_service::{AvatarStore, LoggingEventPublisher, ServiceContextBuilder, UserService};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{avatar_routes, create_router, health_routes, not_found};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let api = apply_middleware(
        create_router(&config.storage),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    let router = api
        .merge(health_routes())
        .merge(avatar_routes(&config.storage))
        .fallback(not_found);

    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// Connects to PostgreSQL, applies migrations, prepares the avatar directory and seeds
/// the configured administrator.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = fame_db::DatabaseConfig::new(&config.database.url).with_pool_size(
        config.database.max_connections,
        config.database.min_connections,
    );
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;

    let avatar_store = AvatarStore::new(
        &config.storage.avatar_dir,
        config.storage.max_avatar_bytes(),
    );
    avatar_store
        .ensure_dirs()
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.session_expiry,
        config.jwt.remember_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .application_repo(Arc::new(PgApplicationRepository::new(pool.clone())))
        .member_repo(Arc::new(PgMemberRepository::new(pool.clone())))
        .jwt_service(jwt_service)
        .avatar_store(Arc::new(avatar_store))
        .publisher(Arc::new(LoggingEventPublisher::new()))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if let Some(admin) = &config.bootstrap_admin {
        match UserService::new(&service_context)
            .ensure_bootstrap_admin(admin)
            .await
        {
            Ok(Some(user)) => info!(user_id = user.id, username = %user.username, "Bootstrap administrator created"),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Bootstrap administrator not created"),
        }
    }

    Ok(AppState::new(service_context, pool, config))
}

/// Serve an application on an already bound listener
///
/// Peer addresses are made available to the per-IP rate limiter.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;
    info!("Server listening on http://{}", address);

    serve(listener, app).await
}
