pub mod category;
pub mod display;
pub mod entity;
pub mod search;
pub mod session;

pub use category::{Category, CategoryInfo};
pub use display::DisplayRecord;
pub use entity::{EntityProperties, RawEntity, Tag};
pub use search::{
    PageRequest, RecommendationPage, RecommendationsResponse, RouteOutcome, SearchContext,
    SearchParams, SearchType, DEFAULT_CATEGORY, DEFAULT_TAG_NAME,
};
pub use session::Session;
