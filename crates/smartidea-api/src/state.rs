//! Shared application state.

use std::sync::Arc;

use smartidea_db::Database;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::services::Orchestrator;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub orchestrator: Arc<Orchestrator>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database, orchestrator: Orchestrator) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.jwt_ttl_hours);
        Self {
            config: Arc::new(config),
            db,
            orchestrator: Arc::new(orchestrator),
            tokens,
        }
    }
}
