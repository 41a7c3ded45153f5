pub mod handlers;
pub mod models;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infra::http::state::ApiState;

/// Content API: list/create posts and record views.
///
/// Method routing provides the 405 contract: any verb a route does not name
/// is answered with Method Not Allowed.
pub fn build_api_router() -> Router<ApiState> {
    Router::new()
        .route(
            "/api/v1/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/api/v1/views", post(handlers::increment_views))
}
