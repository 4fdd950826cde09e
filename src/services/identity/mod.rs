pub mod custom_token;
pub mod factory;
pub mod minter;
pub mod service_account;

pub use custom_token::FirebaseTokenMinter;
pub use factory::build_token_minter;
pub use minter::{MintError, TokenMinter};
pub use service_account::{CredentialError, ServiceAccount};
