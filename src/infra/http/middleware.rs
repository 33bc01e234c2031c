//! Per-request identity and failure logging.
//!
//! Both layers are added with `Router::layer`, so they run after routing and
//! can see the matched route template.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    /// Route template such as `/books/{id}`; `None` when nothing matched.
    pub route: Option<String>,
}

impl RequestContext {
    fn for_request(request: &Request<Body>) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            route: request
                .extensions()
                .get::<MatchedPath>()
                .map(|matched| matched.as_str().to_owned()),
        }
    }
}

pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let ctx = RequestContext::for_request(&request);
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&ctx.request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response.extensions_mut().insert(ctx);
    response
}

/// One failed request, as it is logged.
#[derive(Debug, PartialEq, Eq)]
struct FailedRequest<'a> {
    status: StatusCode,
    route: &'a str,
    code: &'a str,
    source: &'a str,
    detail: &'a str,
    chain: &'a [String],
}

impl<'a> FailedRequest<'a> {
    /// `None` for anything that is not a 4xx or 5xx.
    fn classify(
        status: StatusCode,
        route: &'a str,
        report: Option<&'a ErrorReport>,
    ) -> Option<Self> {
        if !(status.is_client_error() || status.is_server_error()) {
            return None;
        }

        let chain = report.map(|report| report.messages.as_slice()).unwrap_or(&[]);
        Some(Self {
            status,
            route,
            code: report.and_then(|report| report.code).unwrap_or("unclassified"),
            source: report.map(|report| report.source).unwrap_or("unknown"),
            detail: chain
                .first()
                .map(String::as_str)
                .unwrap_or("no diagnostic available"),
            chain,
        })
    }

    fn log(&self, method: &Method, request_id: &str, elapsed_ms: u128) {
        if self.status.is_server_error() {
            error!(
                target = "booktrack::http::response",
                status = self.status.as_u16(),
                method = %method,
                route = self.route,
                code = self.code,
                source = self.source,
                detail = self.detail,
                chain = ?self.chain,
                request_id,
                elapsed_ms,
                "request failed",
            );
        } else {
            warn!(
                target = "booktrack::http::response",
                status = self.status.as_u16(),
                method = %method,
                route = self.route,
                code = self.code,
                source = self.source,
                detail = self.detail,
                request_id,
                elapsed_ms,
                "client request error",
            );
        }
    }
}

pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let started = Instant::now();

    let ctx = request.extensions().get::<RequestContext>().cloned();
    let route = ctx
        .as_ref()
        .and_then(|ctx| ctx.route.clone())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let request_id = ctx.map(|ctx| ctx.request_id).unwrap_or_default();

    let response = next.run(request).await;

    let report = response.extensions().get::<ErrorReport>();
    if let Some(failed) = FailedRequest::classify(response.status(), &route, report) {
        failed.log(&method, &request_id, started.elapsed().as_millis());
    }

    response
}
