/*
 * Responsibility
 * - URL structure of the service
 * - /health for liveness checks, /authenticate for custom token issuance
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{authenticate::authenticate, health::health};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/authenticate", post(authenticate))
}
