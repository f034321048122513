//! Route definitions
//!
//! All API routes organized by resource and mounted under /api.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::services::ServeDir;
use tube_common::StorageConfig;

use crate::handlers::{auth, comments, health, users, videos};
use crate::state::AppState;

/// Headroom for multipart boundaries and the text fields of a form
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the main API router (health routes are separate so they skip rate limiting)
pub fn create_router(storage: &StorageConfig) -> Router<AppState> {
    Router::new().nest("/api", api_routes(storage))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Stored blobs served straight from the upload directory
pub fn upload_routes(storage: &StorageConfig) -> Router<AppState> {
    Router::new().nest_service("/uploads", ServeDir::new(&storage.upload_dir))
}

fn api_routes(storage: &StorageConfig) -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(video_routes(storage))
        .merge(user_routes(storage))
        .merge(comment_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
}

/// Video routes, including the like/dislike ledger
fn video_routes(storage: &StorageConfig) -> Router<AppState> {
    // A video plus thumbnail and caption in one form
    let upload_limit =
        storage.max_video_bytes() + 2 * storage.max_image_bytes() + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/videos", get(videos::list_videos))
        .route(
            "/videos/upload",
            post(videos::upload_video).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/videos/user/:id", get(videos::get_user_videos))
        .route(
            "/videos/:id",
            get(videos::get_video).delete(videos::delete_video),
        )
        .route("/videos/:id/like", post(videos::react))
        .route("/videos/:id/like-status", get(videos::like_status))
}

/// User routes, including subscriptions
fn user_routes(storage: &StorageConfig) -> Router<AppState> {
    let profile_limit = storage.max_image_bytes() + FORM_OVERHEAD_BYTES;

    Router::new()
        .route(
            "/users/profile",
            put(users::update_profile).layer(DefaultBodyLimit::max(profile_limit)),
        )
        .route("/users/:id", get(users::get_user))
        .route("/users/:id/subscribe", post(users::toggle_subscription))
        .route(
            "/users/:id/subscription-status",
            get(users::subscription_status),
        )
}

/// Comment routes; `:id` is the video for reads and writes, the comment for deletes
fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments/:id",
        get(comments::list_comments)
            .post(comments::post_comment)
            .delete(comments::delete_comment),
    )
}
