/*
 * Responsibility
 * - /authenticate request/response DTO
 * - validate() turns the raw (optional) fields into Credentials
 * Fields keep their JSON shape: a non-string employeeId is still "present"
 * and is handed to the identity platform, which refuses it.
 */
use serde::Serialize;
use serde_json::Value;

use crate::error::AppError;

/// Raw input as found in one source (JSON body, form body or query string).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticateRequest {
    pub employee_id: Option<Value>,
    pub token: Option<Value>,
}

impl AuthenticateRequest {
    /// Merge two sources field by field: a present value in `self` wins,
    /// otherwise the present value from `fallback` is used.
    pub fn or(self, fallback: Self) -> Self {
        Self {
            employee_id: present(self.employee_id).or_else(|| present(fallback.employee_id)),
            token: present(self.token).or_else(|| present(fallback.token)),
        }
    }

    pub fn validate(self) -> Result<Credentials, AppError> {
        match (present(self.employee_id), present(self.token)) {
            (Some(employee_id), Some(token)) => Ok(Credentials { employee_id, token }),
            _ => Err(AppError::MissingField),
        }
    }
}

/// A value counts as present unless it is null, `false`, `0` or `""`.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn present(value: Option<Value>) -> Option<Value> {
    value.filter(is_present)
}

/// Validated input: both fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub employee_id: Value,
    pub token: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    pub custom_token: String,
}
