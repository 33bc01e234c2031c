//! Extractors that reject with [`ApiError`] so malformed input gets the
//! same JSON error body as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
