/// Factory: build the process-wide `TokenMinter` from application `Config`.
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::services::identity::{
    CredentialError, FirebaseTokenMinter, ServiceAccount, TokenMinter,
};

pub fn build_token_minter(config: &Config) -> Result<Arc<dyn TokenMinter>, CredentialError> {
    let account = ServiceAccount::from_file(&config.service_account_path)?;
    let minter = FirebaseTokenMinter::new(&account)?;

    info!(
        project_id = account.project_id.as_deref().unwrap_or("<unset>"),
        client_email = minter.client_email(),
        database_url = %config.database_url,
        "identity platform client initialized"
    );

    Ok(Arc::new(minter))
}
