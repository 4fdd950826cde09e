//! CORS for the desk-booking web client.
//!
//! Only `POST /authenticate` (and `GET /health`) are served, so only those methods and
//! `content-type` are allowed. Credentials are never allowed: the token travels in the body.
//! Development accepts any origin; production accepts the exact origins in
//! `CORS_ALLOWED_ORIGINS` and nothing when that list is empty.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::config::Config;

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(600);

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(cors_layer(config))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::POST, Method::GET])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .max_age(PREFLIGHT_MAX_AGE);

    if !config.app_env.is_production() {
        return layer.allow_origin(Any);
    }

    // A wildcard in the list would make AllowOrigin::list panic.
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
