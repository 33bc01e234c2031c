//! To-be-read handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::extract::{ApiJson, ApiPath};
use crate::infra::http::api::models::ToBeReadBookRequest;
use crate::infra::http::api::state::ApiState;

pub async fn list_to_be_read(
    State(state): State<ApiState>,
) -> Result<impl IntoResponse, ApiError> {
    let queued = state.books.get_to_be_read_books().await?;
    Ok(Json(queued))
}

pub async fn to_be_read_for_user(
    State(state): State<ApiState>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let queued = state.books.get_to_be_read_books_by_user(user_id).await?;
    Ok(Json(queued))
}

pub async fn create_to_be_read(
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<ToBeReadBookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let queued = state.books.create_to_be_read_book(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(queued)))
}

pub async fn delete_to_be_read(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.books.delete_to_be_read_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
