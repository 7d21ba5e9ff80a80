//! Router configuration for the HTTP API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    add_comment, create_post, delete_comment, delete_post, get_post, login, posts_by_category,
    recent_posts, recent_posts_by_category, signup, toggle_heart, update_post, AppState,
};
use super::middleware::{create_cors_layer, jwt_auth, JwtState};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    jwt_state: Arc<JwtState>,
    cors_origins: &[String],
) -> Router {
    let member_routes = Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login));

    // Multipart uploads get their own body limit
    let board_routes = Router::new()
        .route("/recent", get(recent_posts))
        .route("/recent-category", get(recent_posts_by_category))
        .route("/category", get(posts_by_category))
        .route(
            "/",
            post(create_post).layer(DefaultBodyLimit::max(app_state.max_upload_size)),
        )
        .route("/:id", get(get_post).put(update_post).delete(delete_post))
        .route("/:id/comment", post(add_comment))
        .route("/:id/heart", post(toggle_heart));

    let comment_routes = Router::new().route("/:id", delete(delete_comment));

    Router::new()
        .nest("/member", member_routes)
        .nest("/board", board_routes)
        .nest("/comment", comment_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = jwt_state.clone();
                    jwt_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Create a router serving stored images under their public URL prefix.
pub fn create_image_router(public_url: &str, storage_path: &str) -> Router {
    let prefix = public_url.trim_matches('/');
    if prefix.is_empty() {
        return Router::new().fallback_service(ServeDir::new(storage_path));
    }
    Router::new().nest_service(&format!("/{prefix}"), ServeDir::new(storage_path))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
