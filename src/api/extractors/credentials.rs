/*
 * Responsibility
 * - Collect employeeId/token from the request body and the query string
 * - Normalize both sources into one AuthenticateRequest (body first, query fallback)
 * - No validation here: handlers call AuthenticateRequest::validate()
 * Body formats
 * - application/json (and +json): fields of a JSON object, any JSON type
 * - application/x-www-form-urlencoded: form fields, first occurrence wins
 * - anything else (or a body that fails to parse) contributes nothing
 * The query string is read like a form body.
 */
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::debug;

use crate::api::dto::authenticate::AuthenticateRequest;

#[derive(Debug, Clone)]
pub struct CredentialsInput(pub AuthenticateRequest);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn from_headers(headers: &HeaderMap) -> Self {
        let mime = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
        {
            Self::Json
        } else if mime == "application/x-www-form-urlencoded" {
            Self::Form
        } else {
            Self::Other
        }
    }
}

impl<S> FromRequest<S> for CredentialsInput
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = req
            .uri()
            .query()
            .map(|q| parse_pairs(q.as_bytes()))
            .unwrap_or_default();

        let kind = BodyKind::from_headers(req.headers());

        // Body read failures (size limit, aborted stream) keep axum's own status.
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let body = parse_body(kind, &bytes);

        Ok(Self(body.or(query)))
    }
}

fn parse_body(kind: BodyKind, bytes: &[u8]) -> AuthenticateRequest {
    if bytes.is_empty() {
        return AuthenticateRequest::default();
    }

    match kind {
        BodyKind::Json => match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => AuthenticateRequest {
                employee_id: value.get("employeeId").cloned(),
                token: value.get("token").cloned(),
            },
            Err(e) => {
                debug!(error = %e, "ignoring unparseable JSON body");
                AuthenticateRequest::default()
            }
        },
        BodyKind::Form => parse_pairs(bytes),
        BodyKind::Other => AuthenticateRequest::default(),
    }
}

/// `application/x-www-form-urlencoded` pairs (form body or query string).
/// A repeated key keeps its first value.
fn parse_pairs(bytes: &[u8]) -> AuthenticateRequest {
    let mut out = AuthenticateRequest::default();
    for (key, value) in url::form_urlencoded::parse(bytes) {
        let slot = match &*key {
            "employeeId" => &mut out.employee_id,
            "token" => &mut out.token,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(Value::String(value.into_owned()));
        }
    }
    out
}
