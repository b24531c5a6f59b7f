pub mod extra_data;
pub mod pagination;
pub mod providers;
pub mod registry;
pub mod router;
pub mod sessions;
pub mod transformer;

pub use providers::{MockProvider, RecommendationProvider, UpstreamProvider};
pub use registry::CategoryRegistry;
pub use router::RecommendationRouter;
pub use sessions::SessionStore;
