use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use desk_auth::app::build_router;
use desk_auth::config::HttpLimits;
use desk_auth::services::identity::custom_token::{
    CUSTOM_TOKEN_TTL_SECONDS, FIREBASE_AUDIENCE, MAX_UID_LENGTH,
};
use desk_auth::services::identity::{
    FirebaseTokenMinter, MintError, ServiceAccount, TokenMinter,
};
use desk_auth::state::AppState;
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use serde_json::{Value, json};
use tower::ServiceExt;

const CLIENT_EMAIL: &str = "firebase-adminsdk-test@desk-booking-test.iam.gserviceaccount.com";

#[derive(Debug, Deserialize)]
struct Claims {
    iss: String,
    sub: String,
    aud: String,
    iat: i64,
    exp: i64,
    uid: String,
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn minter() -> FirebaseTokenMinter {
    let account =
        ServiceAccount::from_file(&fixture("service_account.json")).expect("service account");
    FirebaseTokenMinter::new(&account).expect("minter")
}

fn decode(token: &str) -> Claims {
    let pem = std::fs::read(fixture("test_key.pub.pem")).expect("public key");
    let key = DecodingKey::from_rsa_pem(&pem).expect("decoding key");

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[FIREBASE_AUDIENCE]);
    validation.set_issuer(&[CLIENT_EMAIL]);

    jsonwebtoken::decode::<Claims>(token, &key, &validation)
        .expect("valid custom token")
        .claims
}

#[tokio::test]
async fn minted_token_is_signed_with_service_account_key() {
    let token = minter().mint_custom_token(&json!("E123")).await.expect("token");

    let header = jsonwebtoken::decode_header(&token).expect("header");
    assert_eq!(header.alg, Algorithm::RS256);
    assert_eq!(header.typ.as_deref(), Some("JWT"));

    let claims = decode(&token);
    assert_eq!(claims.uid, "E123");
    assert_eq!(claims.iss, CLIENT_EMAIL);
    assert_eq!(claims.sub, CLIENT_EMAIL);
    assert_eq!(claims.aud, FIREBASE_AUDIENCE);
    assert_eq!(claims.exp - claims.iat, CUSTOM_TOKEN_TTL_SECONDS);

    let now = chrono::Utc::now().timestamp();
    assert!((claims.iat - now).abs() <= 5);
}

#[tokio::test]
async fn overlong_uid_is_refused() {
    let err = minter()
        .mint_custom_token(&json!("E".repeat(MAX_UID_LENGTH + 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, MintError::InvalidUid(_)));
}

#[tokio::test]
async fn endpoint_returns_verifiable_token() {
    let app = build_router(AppState::new(Arc::new(minter())), &HttpLimits::default());

    let req = Request::builder()
        .method("POST")
        .uri("/authenticate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"employeeId": "E123", "token": "abc"}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(req).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    let object = body.as_object().expect("object");
    assert_eq!(object.len(), 1);

    let token = object["customToken"].as_str().expect("customToken");
    assert_eq!(decode(token).uid, "E123");
}

#[tokio::test]
async fn endpoint_hides_invalid_uid_reason() {
    let app = build_router(AppState::new(Arc::new(minter())), &HttpLimits::default());

    let req = Request::builder()
        .method("POST")
        .uri("/authenticate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"employeeId": "E".repeat(MAX_UID_LENGTH + 1), "token": "abc"}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(req).await.expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body, json!({"error": "Failed to create custom token"}));
}

#[tokio::test]
async fn non_string_employee_id_is_refused_by_platform() {
    let app = build_router(AppState::new(Arc::new(minter())), &HttpLimits::default());

    let req = Request::builder()
        .method("POST")
        .uri("/authenticate?employeeId=Q1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"employeeId": 123, "token": "abc"}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(req).await.expect("response");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(body, json!({"error": "Failed to create custom token"}));
}
