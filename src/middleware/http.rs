//! Transport-level middleware shared by every route.
//!
//! Outermost first:
//! - `x-request-id`: generated when missing, echoed back on the response
//! - request span (method, path, request id) so a failure log can be traced to its request
//! - timeout (408) and body limit (413) from `Config`
//!
//! The span records the path only. The query string may carry the presented token.

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::error_handling::HandleErrorLayer;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::ServiceBuilderExt;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::HttpLimits;

pub fn apply(router: Router, limits: &HttpLimits) -> Router {
    let layers = ServiceBuilder::new()
        .set_x_request_id(MakeRequestUuid)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .propagate_x_request_id()
        .layer(HandleErrorLayer::new(middleware_error))
        .layer(TimeoutLayer::new(limits.request_timeout))
        .layer(RequestBodyLimitLayer::new(limits.body_limit_bytes));

    router.layer(layers)
}

fn request_span(req: &Request<Body>) -> Span {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        request_id,
    )
}

/// Errors raised by the middleware itself, answered in the same `{"error": ...}` shape as handlers.
async fn middleware_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({"error": "request timed out"})),
        )
            .into_response()
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "internal server error"})),
        )
            .into_response()
    }
}
