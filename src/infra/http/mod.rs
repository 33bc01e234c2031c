pub mod api;
mod middleware;

pub use api::{ApiState, build_api_router};
pub use middleware::RequestContext;

use axum::{Router, middleware as axum_middleware};

/// Full application router: API routes wrapped in request-id and response logging.
pub fn build_router(state: ApiState) -> Router {
    build_api_router(state)
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}
