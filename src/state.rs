use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::config::AppConfig;
use crate::database::Store;

/// Everything a handler needs, built once at startup and cloned per request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    pub tokens: TokenKeys,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let tokens = TokenKeys::from_config(&config.security);
        Self {
            config: Arc::new(config),
            store,
            tokens,
        }
    }

    /// Release the store's resources
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}
