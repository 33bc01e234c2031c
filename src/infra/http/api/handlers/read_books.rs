//! Read-book handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::extract::{ApiJson, ApiPath};
use crate::infra::http::api::models::ReadBookRequest;
use crate::infra::http::api::state::ApiState;

pub async fn list_read_books(
    State(state): State<ApiState>,
) -> Result<impl IntoResponse, ApiError> {
    let read_books = state.books.get_read_books().await?;
    Ok(Json(read_books))
}

pub async fn get_read_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let read_book = state.books.get_read_book_by_id(id).await?;
    Ok(Json(read_book))
}

pub async fn read_books_for_user(
    State(state): State<ApiState>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let read_books = state.books.get_read_books_by_user(user_id).await?;
    Ok(Json(read_books))
}

pub async fn create_read_book(
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<ReadBookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let read_book = state.books.create_read_book(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(read_book)))
}

pub async fn update_read_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<ReadBookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let read_book = state.books.update_read_book(id, payload.into()).await?;
    Ok(Json(read_book))
}

pub async fn delete_read_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.books.delete_read_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
