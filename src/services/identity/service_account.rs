//! Service-account credential file (the JSON key downloaded from the platform console).
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to read service account file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed service account JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("service account is missing `{0}`")]
    MissingField(&'static str),
    #[error("service account private key is not a valid RSA PEM: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),
}

#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub private_key: String,
}

impl std::fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .finish_non_exhaustive()
    }
}

impl ServiceAccount {
    pub fn from_file(path: &Path) -> Result<Self, CredentialError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CredentialError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, CredentialError> {
        let account: ServiceAccount = serde_json::from_str(raw)?;

        if account.client_email.trim().is_empty() {
            return Err(CredentialError::MissingField("client_email"));
        }
        if account.private_key.trim().is_empty() {
            return Err(CredentialError::MissingField("private_key"));
        }

        Ok(account)
    }
}
