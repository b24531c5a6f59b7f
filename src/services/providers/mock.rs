/// Offline recommendation backend
///
/// Serves the entity fixtures bundled with each category in the registry.
/// Tag searches keep entities carrying exactly the requested tag id; message
/// searches return the category's list unfiltered, since free-text relevance
/// belongs to the real recommendation service.
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{Category, PageRequest, RawEntity, RecommendationPage, SearchType},
    services::{pagination::paginate, providers::RecommendationProvider, registry::CategoryRegistry},
};

pub struct MockProvider {
    entities: HashMap<Category, Vec<RawEntity>>,
    per_page: usize,
}

impl MockProvider {
    /// Loads every category's bundled fixture
    pub fn new(per_page: usize) -> AppResult<Self> {
        let mut entities = HashMap::new();

        for entry in CategoryRegistry::global().entries() {
            let list: Vec<RawEntity> = serde_json::from_str(entry.fixture).map_err(|e| {
                AppError::Internal(format!(
                    "Invalid fixture for category {}: {}",
                    entry.category, e
                ))
            })?;
            entities.insert(entry.category, list);
        }

        tracing::info!(
            categories = entities.len(),
            per_page,
            "Loaded mock recommendation fixtures"
        );

        Ok(Self::with_entities(entities, per_page))
    }

    /// Builds a provider over an explicit entity set
    pub fn with_entities(entities: HashMap<Category, Vec<RawEntity>>, per_page: usize) -> Self {
        Self { entities, per_page }
    }

    fn matching(&self, request: &PageRequest) -> Vec<RawEntity> {
        let source = self
            .entities
            .get(&request.category)
            .map(Vec::as_slice)
            .unwrap_or_default();

        match request.search_type {
            SearchType::Tag => match request.query.as_deref() {
                Some(tag_id) => source
                    .iter()
                    .filter(|entity| entity.has_tag(tag_id))
                    .cloned()
                    .collect(),
                None => Vec::new(),
            },
            SearchType::Message => source.to_vec(),
        }
    }
}

#[async_trait::async_trait]
impl RecommendationProvider for MockProvider {
    async fn fetch_page(&self, request: &PageRequest) -> AppResult<RecommendationPage> {
        let matching = self.matching(request);
        let (entities, has_next) = paginate(&matching, request.page, self.per_page);

        tracing::debug!(
            category = %request.category,
            matching = matching.len(),
            returned = entities.len(),
            has_next,
            provider = "mock",
            "Mock recommendation page served"
        );

        Ok(RecommendationPage { entities, has_next })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
