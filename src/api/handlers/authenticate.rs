/*
 * Responsibility
 * - POST /authenticate
 * - CredentialsInput (body/query) → validate → mint custom token for employeeId
 * - Mint failures are logged here and answered with a fixed message
 */
use axum::{Json, extract::State};
use tracing::error;

use crate::api::dto::authenticate::{AuthenticateResponse, Credentials};
use crate::api::extractors::CredentialsInput;
use crate::error::AppError;
use crate::state::AppState;

pub async fn authenticate(
    State(state): State<AppState>,
    CredentialsInput(req): CredentialsInput,
) -> Result<Json<AuthenticateResponse>, AppError> {
    // The presented token is required but not checked against any credential store.
    let Credentials {
        employee_id,
        token: _,
    } = req.validate()?;

    let custom_token = state
        .minter
        .mint_custom_token(&employee_id)
        .await
        .map_err(|e| {
            error!(employee_id = %employee_id, error = %e, "Error creating custom token");
            AppError::TokenMinting
        })?;

    Ok(Json(AuthenticateResponse { custom_token }))
}
