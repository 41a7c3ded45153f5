//! Content API handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::posts::CreatePostCommand;
use crate::infra::http::error::ApiError;
use crate::infra::http::state::ApiState;

use super::models::{IncrementRequest, PostPayload, ViewsResponse};

pub async fn list_posts(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let posts = state
        .posts
        .list_posts()
        .await
        .map_err(|err| ApiError::operation_failed("could not list posts", &err))?;

    let payload: Vec<PostPayload> = posts.into_iter().map(Into::into).collect();
    Ok(Json(payload))
}

pub async fn create_post(
    State(state): State<ApiState>,
    Json(command): Json<CreatePostCommand>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .posts
        .create_post(command)
        .await
        .map_err(|err| ApiError::operation_failed("could not create post", &err))?;

    Ok((StatusCode::CREATED, Json(PostPayload::from(created))))
}

pub async fn increment_views(
    State(state): State<ApiState>,
    Json(request): Json<IncrementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let views = state
        .posts
        .increment_views(request.id)
        .await
        .map_err(|err| ApiError::operation_failed("could not increment view count", &err))?;

    Ok(Json(ViewsResponse { views }))
}
