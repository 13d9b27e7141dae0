use std::sync::Arc;

use scout_engine::Engine;

use crate::auth::CredentialStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
    pub credentials: Arc<CredentialStore>,
}

impl AppState {
    pub fn new(engine: Engine, credentials: Arc<CredentialStore>) -> Self {
        Self {
            engine,
            credentials,
        }
    }
}
