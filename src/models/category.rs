use serde::Serialize;

/// The closed set of recommendation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Movies,
    Books,
    Places,
    TvShows,
}

/// Category metadata shown by the shell's category picker
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub value: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::Movies,
        Category::Books,
        Category::Places,
        Category::TvShows,
    ];

    /// Canonical key, also sent upstream as the selected category
    pub fn value(&self) -> &'static str {
        match self {
            Category::Movies => "Movies",
            Category::Books => "Books",
            Category::Places => "Places",
            Category::TvShows => "TV Shows",
        }
    }

    pub fn info(&self) -> CategoryInfo {
        let (label, placeholder) = match self {
            Category::Movies => (
                "Tell us what kind of movie recommendations you are looking for",
                "e.g., 'I just saw Romeo and Juliet, can you recommend more movies like this..'",
            ),
            Category::Books => (
                "Tell us what kind of book recommendations you are looking for",
                "e.g., 'I just read The Great Gatsby, can you recommend more books like this..'",
            ),
            Category::Places => (
                "Tell us what kind of place recommendations you are looking for",
                "e.g., 'I am looking for good restaurants in New York, can you recommend some places..'",
            ),
            Category::TvShows => (
                "Tell us what kind of TV show recommendations you are looking for",
                "e.g., 'I just saw Breaking Bad, can you recommend more shows like this..'",
            ),
        };

        CategoryInfo {
            name: self.value(),
            value: self.value(),
            label,
            placeholder,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
