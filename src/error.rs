/*
 * Responsibility
 * - HTTP-facing AppError definition
 * - IntoResponse implementation (HTTP status / JSON error body)
 * - Messages are fixed strings: underlying causes stay in the server log
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("employeeId and token are required")]
    MissingField,

    #[error("Failed to create custom token")]
    TokenMinting,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField => StatusCode::BAD_REQUEST,
            AppError::TokenMinting => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_maps_to_bad_request() {
        let res = AppError::MissingField.into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn token_minting_maps_to_internal_server_error() {
        let res = AppError::TokenMinting.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_are_fixed() {
        assert_eq!(
            AppError::MissingField.to_string(),
            "employeeId and token are required"
        );
        assert_eq!(
            AppError::TokenMinting.to_string(),
            "Failed to create custom token"
        );
    }
}
