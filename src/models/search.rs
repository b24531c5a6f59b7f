use serde::{Deserialize, Serialize};

use super::{Category, DisplayRecord, RawEntity};

pub const DEFAULT_CATEGORY: &str = "Movie";
pub const DEFAULT_TAG_NAME: &str = "Unknown Tag";

/// Whether a query is free text or a tag id
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Message,
    Tag,
}

impl SearchType {
    /// Lenient parse: anything other than `tag` is a message search
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("tag") {
            SearchType::Tag
        } else {
            SearchType::Message
        }
    }

    /// Upstream request field carrying the query value
    pub fn query_field(&self) -> &'static str {
        match self {
            SearchType::Message => "user_message",
            SearchType::Tag => "selected_tag_id",
        }
    }
}

/// Parsed search parameters for one recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub category: String,
    pub page: u32,
    pub search_type: SearchType,
    pub query: Option<String>,
    pub session_id: Option<String>,
    pub tag_name: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            category: DEFAULT_CATEGORY.to_string(),
            page: 1,
            search_type: SearchType::default(),
            query: None,
            session_id: None,
            tag_name: DEFAULT_TAG_NAME.to_string(),
        }
    }
}

/// Echo of what was searched, for client-side display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchContext {
    #[serde(rename = "type")]
    pub search_type: SearchType,
    pub query: Option<String>,
    pub name: String,
}

impl From<&SearchParams> for SearchContext {
    fn from(params: &SearchParams) -> Self {
        Self {
            search_type: params.search_type,
            query: params.query.clone(),
            name: params.tag_name.clone(),
        }
    }
}

/// What a provider is asked for
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub session_id: Option<String>,
    pub category: Category,
    pub query: Option<String>,
    pub search_type: SearchType,
    pub page: u32,
}

/// One page of raw entities from a provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationPage {
    pub entities: Vec<RawEntity>,
    pub has_next: bool,
}

/// Router output, already normalized for display
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    pub items: Vec<DisplayRecord>,
    pub has_next: bool,
    pub context: SearchContext,
    pub error: Option<String>,
}

/// JSON envelope of `GET /api/recommendations`
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<DisplayRecord>,
    pub has_next: bool,
    pub next_page: u32,
    pub search_context: SearchContext,
    pub error_message: Option<String>,
}

impl RecommendationsResponse {
    pub fn new(outcome: RouteOutcome, page: u32) -> Self {
        Self {
            recommendations: outcome.items,
            has_next: outcome.has_next,
            next_page: page.saturating_add(1),
            search_context: outcome.context,
            error_message: outcome.error,
        }
    }
}
