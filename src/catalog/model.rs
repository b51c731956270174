use serde::Deserialize;

/// A playable audio resource. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    /// Display label of the category the track belongs to.
    #[serde(default)]
    pub category: String,
    /// Source locator: `http(s)://`, `file://` or a plain path.
    pub uri: String,
    #[serde(default)]
    pub artwork: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Ordered categories, each with its ordered tracks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub(super) categories: Vec<Category>,
}

impl Catalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.track_count() == 0
    }

    pub fn track_count(&self) -> usize {
        self.categories.iter().map(|c| c.tracks.len()).sum()
    }

    /// Look a track up by id.
    pub fn find(&self, id: &str) -> Option<&Track> {
        self.categories
            .iter()
            .flat_map(|c| c.tracks.iter())
            .find(|t| t.id == id)
    }
}
