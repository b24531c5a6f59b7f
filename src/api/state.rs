use std::sync::Arc;

use crate::config::{Config, DataSource};
use crate::error::AppResult;
use crate::services::{
    MockProvider, RecommendationProvider, RecommendationRouter, SessionStore, UpstreamProvider,
};

use super::session_cookie::SessionCookie;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub router: Arc<RecommendationRouter>,
    pub sessions: SessionStore,
    pub session_cookie: SessionCookie,
}

impl AppState {
    /// Creates application state over an explicit recommendation provider
    pub fn new(config: Config, provider: Arc<dyn RecommendationProvider>) -> Self {
        Self {
            session_cookie: SessionCookie::new(config.secret_key.clone()),
            router: Arc::new(RecommendationRouter::new(provider)),
            sessions: SessionStore::with_limits(config.session_ttl_secs, config.max_sessions),
            config: Arc::new(config),
        }
    }

    /// Creates application state with the provider selected by `DATA_SOURCE`
    pub fn from_config(config: Config) -> AppResult<Self> {
        let provider: Arc<dyn RecommendationProvider> = match config.data_source {
            DataSource::Live => Arc::new(UpstreamProvider::new(config.api_base_url.clone())),
            DataSource::Mock => Arc::new(MockProvider::new(config.per_page)?),
        };

        tracing::info!(
            provider = provider.name(),
            api_base_url = %config.api_base_url,
            "Recommendation provider configured"
        );

        Ok(Self::new(config, provider))
    }
}
