use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::error::ErrorReport;
use crate::infra::http::api::error::codes;
use crate::infra::http::api::state::ApiState;

/// `204` when the database answers a trivial query, `503` otherwise.
pub async fn db_health(State(state): State<ApiState>) -> Response {
    match state.health.ping().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .with_code(codes::DB_UNAVAILABLE)
            .attach(&mut response);
            response
        }
    }
}
