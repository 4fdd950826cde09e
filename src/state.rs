/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cheap to clone (Arc inside); built once at startup
 */
use std::sync::Arc;

use crate::services::identity::TokenMinter;

#[derive(Clone)]
pub struct AppState {
    pub minter: Arc<dyn TokenMinter>,
}

impl AppState {
    pub fn new(minter: Arc<dyn TokenMinter>) -> Self {
        Self { minter }
    }
}
