use std::collections::HashSet;
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::model::Catalog;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("catalog has no tracks")]
    Empty,

    #[error("duplicate track id {0:?}")]
    DuplicateId(String),

    #[error("duplicate category id {0:?}")]
    DuplicateCategory(String),
}

/// Loading catalogs from TOML.
///
/// ```toml
/// [[categories]]
/// id = "rain"
/// title = "Rain"
///
/// [[categories.tracks]]
/// id = "gentle-rain"
/// title = "Gentle Rain"
/// uri = "/home/me/sounds/rain.ogg"
/// ```
impl Catalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let mut catalog: Catalog = toml::from_str(text)?;

        // Tracks without a category label take the one of their section.
        for category in &mut catalog.categories {
            for track in &mut category.tracks {
                if track.category.trim().is_empty() {
                    track.category = category.title.clone();
                }
            }
        }

        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut categories = HashSet::new();
        for category in &self.categories {
            if !categories.insert(category.id.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for track in self.categories.iter().flat_map(|c| c.tracks.iter()) {
            if !seen.insert(track.id.as_str()) {
                return Err(CatalogError::DuplicateId(track.id.clone()));
            }
        }
        Ok(())
    }
}
