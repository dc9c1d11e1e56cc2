//! Route definitions
//!
//! API routes live under `/api`; health checks and the avatar directory are mounted
//! separately so that rate limiting does not apply to them.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use fame_common::{AppError, StorageConfig};
use tower_http::services::ServeDir;

use crate::handlers::{admin, applications, auth, health, members};
use crate::response::ApiError;
use crate::state::AppState;

/// Room for multipart boundaries and the other form fields
const FORM_OVERHEAD: usize = 64 * 1024;

/// Create the API router
pub fn create_router(storage: &StorageConfig) -> Router<AppState> {
    Router::new().nest("/api", api_routes(storage))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Stored avatars under `/img`
pub fn avatar_routes(storage: &StorageConfig) -> Router<AppState> {
    Router::new().nest_service("/img", ServeDir::new(&storage.avatar_dir))
}

/// Fallback for unknown paths, in the API error shape
pub async fn not_found() -> ApiError {
    ApiError::App(AppError::not_found("route"))
}

fn api_routes(storage: &StorageConfig) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(application_routes(storage))
        .merge(member_routes())
        .merge(admin_routes(storage))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
        .route("/auth/logout", post(auth::logout))
}

/// Application routes
fn application_routes(storage: &StorageConfig) -> Router<AppState> {
    // base64 inflates the embedded avatar by a third
    let submit_limit = storage.max_avatar_bytes() / 3 * 4 + FORM_OVERHEAD;

    Router::new()
        .route(
            "/applications",
            post(applications::submit)
                .layer(DefaultBodyLimit::max(submit_limit))
                .get(applications::list),
        )
        .route("/applications/my", get(applications::list_mine))
        .route("/applications/:id", get(applications::get))
        .route("/applications/:id/status", put(applications::update_status))
}

/// Public fame list routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(members::list))
        .route("/members/:id", get(members::get))
}

/// Staff routes
fn admin_routes(storage: &StorageConfig) -> Router<AppState> {
    let upload_limit = storage.max_avatar_bytes() + FORM_OVERHEAD;

    Router::new()
        .route(
            "/admin/members",
            get(admin::list_members).post(admin::create_member),
        )
        .route(
            "/admin/members/:id",
            put(admin::update_member).delete(admin::delete_member),
        )
        .route("/admin/next-id", get(admin::next_id))
        .route(
            "/admin/upload-avatar",
            post(admin::upload_avatar).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/admin/stats", get(admin::stats))
}
