use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::services::identity::minter::{MintError, TokenMinter};
use crate::services::identity::service_account::{CredentialError, ServiceAccount};

/// Audience every custom token must carry.
pub const FIREBASE_AUDIENCE: &str =
    "https://identitytoolkit.googleapis.com/google.identity.identitytoolkit.v1.IdentityToolkit";

/// Custom tokens are valid for one hour (platform maximum).
pub const CUSTOM_TOKEN_TTL_SECONDS: i64 = 3600;

pub const MAX_UID_LENGTH: usize = 128;

#[derive(Debug, Serialize)]
struct CustomTokenClaims<'a> {
    iss: &'a str,
    sub: &'a str,
    aud: &'static str,
    iat: i64,
    exp: i64,
    uid: &'a str,
}

/// Mints custom tokens locally with the service account's RSA key (RS256).
///
/// Built once at startup. Holds no mutable state, so one instance serves all requests.
#[derive(Clone)]
pub struct FirebaseTokenMinter {
    client_email: String,
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for FirebaseTokenMinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseTokenMinter")
            .field("client_email", &self.client_email)
            .finish_non_exhaustive()
    }
}

impl FirebaseTokenMinter {
    /// `private_key` must be an RSA key in PEM format (PKCS#1 or PKCS#8).
    pub fn new(account: &ServiceAccount) -> Result<Self, CredentialError> {
        let encoding_key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
            .map_err(CredentialError::InvalidKey)?;

        Ok(Self {
            client_email: account.client_email.clone(),
            encoding_key,
        })
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    fn sign(&self, uid: &str, now: i64) -> Result<String, MintError> {
        validate_uid(uid)?;

        let claims = CustomTokenClaims {
            iss: &self.client_email,
            sub: &self.client_email,
            aud: FIREBASE_AUDIENCE,
            iat: now,
            exp: now + CUSTOM_TOKEN_TTL_SECONDS,
            uid,
        };

        // Header::new sets `typ: JWT`.
        let header = Header::new(Algorithm::RS256);
        let token = jsonwebtoken::encode(&header, &claims, &self.encoding_key)?;
        Ok(token)
    }
}

#[async_trait]
impl TokenMinter for FirebaseTokenMinter {
    async fn mint_custom_token(&self, uid: &Value) -> Result<String, MintError> {
        let uid = uid.as_str().ok_or_else(|| {
            MintError::InvalidUid(format!("uid must be a string, got {uid}"))
        })?;
        let now = chrono::Utc::now().timestamp();
        let token = self.sign(uid, now)?;
        debug!(uid, "minted custom token");
        Ok(token)
    }
}

fn validate_uid(uid: &str) -> Result<(), MintError> {
    if uid.is_empty() {
        return Err(MintError::InvalidUid(
            "uid must be a non-empty string".to_string(),
        ));
    }
    if uid.chars().count() > MAX_UID_LENGTH {
        return Err(MintError::InvalidUid(format!(
            "uid must be at most {MAX_UID_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_length_boundary() {
        assert!(validate_uid(&"a".repeat(MAX_UID_LENGTH)).is_ok());
        assert!(matches!(
            validate_uid(&"a".repeat(MAX_UID_LENGTH + 1)),
            Err(MintError::InvalidUid(_))
        ));
    }

    #[test]
    fn uid_length_counts_characters_not_bytes() {
        assert!(validate_uid(&"é".repeat(MAX_UID_LENGTH)).is_ok());
    }

    #[test]
    fn empty_uid_is_invalid() {
        assert!(matches!(validate_uid(""), Err(MintError::InvalidUid(_))));
    }

    #[tokio::test]
    async fn non_string_uid_is_invalid() {
        let minter = FirebaseTokenMinter {
            client_email: "svc@example.com".to_string(),
            encoding_key: EncodingKey::from_secret(b"unused"),
        };

        for uid in [serde_json::json!(123), serde_json::json!(true), serde_json::json!({})] {
            let err = minter.mint_custom_token(&uid).await.unwrap_err();
            assert!(matches!(err, MintError::InvalidUid(_)), "uid {uid}");
        }
    }

    #[test]
    fn non_rsa_key_is_rejected_at_construction() {
        let account = ServiceAccount::from_json(
            r#"{"client_email": "svc@example.com", "private_key": "not a pem"}"#,
        )
        .expect("service account");

        let err = FirebaseTokenMinter::new(&account).unwrap_err();
        assert!(matches!(err, CredentialError::InvalidKey(_)));
    }
}
