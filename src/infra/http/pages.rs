//! Generated page routes.
//!
//! `/blog` and `/blog/{id}` serve the materialized page documents the
//! generator maintains; freshness and fallback behavior live in
//! [`crate::application::pages`], not here.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use crate::infra::http::api::models::{DetailPageDoc, ListPageDoc};
use crate::infra::http::error::ApiError;
use crate::infra::http::state::ApiState;

pub fn build_pages_router() -> Router<ApiState> {
    Router::new()
        .route("/blog", get(list_page))
        .route("/blog/{id}", get(detail_page))
}

async fn list_page(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .pages
        .list_page()
        .await
        .map_err(|err| ApiError::operation_failed("could not build listing page", &err))?;
    Ok(Json(ListPageDoc::from(page.as_ref())))
}

async fn detail_page(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .pages
        .detail_page(id)
        .await
        .map_err(|err| ApiError::operation_failed("could not build detail page", &err))?;

    match page {
        Some(page) => Ok(Json(DetailPageDoc::from(page.as_ref()))),
        None => Err(ApiError::not_found("post not found")),
    }
}
