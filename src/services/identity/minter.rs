//! Identity platform interface consumed by the HTTP layer.
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from minting a custom token.
///
/// Note:
/// - These never reach the caller. Handlers log them and answer with a fixed message.
#[derive(Debug, Error)]
pub enum MintError {
    #[error("invalid uid: {0}")]
    InvalidUid(String),
    #[error("failed to sign custom token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// "Mint a custom authentication token for a subject."
///
/// `uid` arrives exactly as the caller sent it. Anything that is not an acceptable
/// identifier (wrong JSON type, empty, too long) is refused with `MintError::InvalidUid`.
///
/// Implementations are shared by every request (`Arc<dyn TokenMinter>`), so they must be
/// read-only after construction. Each call is independent: no caching, no dedup.
#[async_trait]
pub trait TokenMinter: Send + Sync + 'static {
    async fn mint_custom_token(&self, uid: &Value) -> Result<String, MintError>;
}
