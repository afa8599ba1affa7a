use serde::{Deserialize, Serialize};

/// A configured syndication feed endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub category: String,
}

/// Repository trait for accessing the feed source catalog
pub trait SourceRepository: Send + Sync {
    fn get_all_sources(&self) -> Vec<Source>;

    /// Returns the sources whose category matches exactly (case-sensitive).
    /// Without a category every source is returned.
    fn list_sources(&self, category: Option<&str>) -> Vec<Source> {
        match category {
            Some(category) => self
                .get_all_sources()
                .into_iter()
                .filter(|source| source.category == category)
                .collect(),
            None => self.get_all_sources(),
        }
    }

    /// Distinct categories in catalog order
    fn list_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for source in self.get_all_sources() {
            if !categories.contains(&source.category) {
                categories.push(source.category);
            }
        }
        categories
    }
}
