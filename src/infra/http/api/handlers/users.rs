//! User handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::extract::{ApiJson, ApiPath};
use crate::infra::http::api::models::UserRequest;
use crate::infra::http::api::state::ApiState;

pub async fn list_users(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let users = state.users.get_users().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.get_user_by_id(id).await?;
    Ok(Json(user))
}

pub async fn get_user_by_username(
    State(state): State<ApiState>,
    ApiPath(username): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.get_user_by_username(&username).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<UserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.create_user(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn create_users(
    State(state): State<ApiState>,
    ApiJson(payload): ApiJson<Vec<UserRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let commands = payload.into_iter().map(Into::into).collect();
    let users = state.users.create_users(commands).await?;
    Ok((StatusCode::CREATED, Json(users)))
}

pub async fn update_user(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.update_user(id, payload.into()).await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<ApiState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
