//! Book handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::extract::{ApiJson, ApiPath};
use crate::infra::http::api::models::BookRequest;
use crate::infra::http::api::state::ApiState;

pub async fn list_books(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let books = state.books.get_books().await?;
    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.books.get_book_by_id(id).await?;
    Ok(Json(book))
}

pub async fn create_book(
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<BookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.books.create_book(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<BookRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let book = state.books.update_book(id, payload.into()).await?;
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.books.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn books_by_genre(
    State(state): State<ApiState>,
    ApiPath(genre): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let books = state.books.get_books_by_genre(&genre).await?;
    Ok(Json(books))
}

pub async fn books_by_author(
    State(state): State<ApiState>,
    ApiPath(author): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let books = state.books.get_books_by_author(&author).await?;
    Ok(Json(books))
}

pub async fn books_by_title(
    State(state): State<ApiState>,
    ApiPath(title): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let books = state.books.get_books_by_title(&title).await?;
    Ok(Json(books))
}

pub async fn recommendations(
    State(state): State<ApiState>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let books = state.recommendations.recommend_for_user(user_id).await?;
    Ok(Json(books))
}
