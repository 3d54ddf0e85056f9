use std::sync::Arc;

use crate::auth::TokenKeys;
use crate::config::AppConfig;
use crate::database::Database;

/// Shared application state, available to all handlers via `State<AppState>`.
/// Built once at startup and cloned per request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
    pub keys: TokenKeys,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig) -> Self {
        let keys = TokenKeys::from_config(&config.security);
        Self {
            db,
            config: Arc::new(config),
            keys,
        }
    }
}
