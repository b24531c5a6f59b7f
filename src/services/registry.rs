use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::{Category, CategoryInfo, DisplayRecord, RawEntity};
use crate::services::transformer;

/// Function turning a raw entity into a display record
pub type TransformFn = fn(&RawEntity) -> DisplayRecord;

/// Registry entry for one category
#[derive(Clone, Copy)]
pub struct CategoryEntry {
    pub category: Category,
    pub transform: TransformFn,
    /// Bundled entity list used by the offline backend
    pub fixture: &'static str,
}

impl std::fmt::Debug for CategoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryEntry")
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Static lookup table from category key to its entry.
///
/// Keys are matched case-insensitively and accept singular aliases
/// (`Movie`, `Book`, `Place`, `TV Show`) since those are what the shell sends.
pub struct CategoryRegistry {
    entries: Vec<CategoryEntry>,
    by_key: HashMap<String, usize>,
}

static REGISTRY: OnceLock<CategoryRegistry> = OnceLock::new();

impl CategoryRegistry {
    /// The process-wide registry, built on first use
    pub fn global() -> &'static CategoryRegistry {
        REGISTRY.get_or_init(Self::build)
    }

    fn build() -> Self {
        let mut entries = Vec::with_capacity(Category::ALL.len());
        let mut by_key = HashMap::new();

        for category in Category::ALL {
            let (singular, fixture) = match category {
                Category::Movies => ("Movie", include_str!("fixtures/movies.json")),
                Category::Books => ("Book", include_str!("fixtures/books.json")),
                Category::Places => ("Place", include_str!("fixtures/places.json")),
                Category::TvShows => ("TV Show", include_str!("fixtures/tv_shows.json")),
            };

            let index = entries.len();
            entries.push(CategoryEntry {
                category,
                transform: transformer::for_category(category),
                fixture,
            });
            by_key.insert(category.value().to_lowercase(), index);
            by_key.insert(singular.to_lowercase(), index);
        }

        Self { entries, by_key }
    }

    /// Looks up a category by key; unknown keys are `None`
    pub fn lookup(&self, key: &str) -> Option<&CategoryEntry> {
        self.by_key
            .get(&key.trim().to_lowercase())
            .map(|&index| &self.entries[index])
    }

    /// Entries in display order, one per category
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Category metadata for the shell's picker
    pub fn categories(&self) -> Vec<CategoryInfo> {
        self.entries.iter().map(|entry| entry.category.info()).collect()
    }
}
