/// Recommendation data providers
///
/// The router does not care where raw entities come from: the live backend
/// proxies the external recommendation API, the mock backend serves bundled
/// fixtures. Both return one page of raw entities plus a has-next flag.
use crate::{
    error::AppResult,
    models::{PageRequest, RecommendationPage},
};

pub mod mock;
pub mod upstream;

pub use mock::MockProvider;
pub use upstream::UpstreamProvider;

/// Trait for recommendation backends
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Fetch one page of recommendations
    ///
    /// Page 1 starts a recommendation session; later pages continue it.
    async fn fetch_page(&self, request: &PageRequest) -> AppResult<RecommendationPage>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
