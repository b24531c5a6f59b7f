use std::sync::Arc;

use crate::{
    models::{PageRequest, RouteOutcome, SearchContext, SearchParams},
    services::{providers::RecommendationProvider, registry::CategoryRegistry},
};

/// Message shown to the user when the backend could not be reached
pub const FETCH_FAILED_MESSAGE: &str =
    "We couldn't fetch recommendations right now. Please try again in a moment.";

/// Turns search parameters into a page of display-ready recommendations.
///
/// Never fails: unknown categories produce an empty feed, and provider errors
/// are logged and surfaced as a soft error message next to an empty feed.
pub struct RecommendationRouter {
    provider: Arc<dyn RecommendationProvider>,
}

impl RecommendationRouter {
    pub fn new(provider: Arc<dyn RecommendationProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn route(&self, params: SearchParams) -> RouteOutcome {
        let context = SearchContext::from(&params);

        let Some(entry) = CategoryRegistry::global().lookup(&params.category) else {
            tracing::info!(category = %params.category, "Unknown category, no recommendations");
            return RouteOutcome {
                items: Vec::new(),
                has_next: false,
                context,
                error: None,
            };
        };

        let request = PageRequest {
            session_id: params.session_id,
            category: entry.category,
            query: params.query,
            search_type: params.search_type,
            page: params.page,
        };

        match self.provider.fetch_page(&request).await {
            Ok(page) => RouteOutcome {
                items: page.entities.iter().map(entry.transform).collect(),
                has_next: page.has_next,
                context,
                error: None,
            },
            Err(e) => {
                tracing::error!(
                    error = %e,
                    provider = self.provider.name(),
                    category = %request.category,
                    query = ?request.query,
                    page = request.page,
                    "Failed to fetch recommendations"
                );
                RouteOutcome {
                    items: Vec::new(),
                    has_next: false,
                    context,
                    error: Some(FETCH_FAILED_MESSAGE.to_string()),
                }
            }
        }
    }
}
