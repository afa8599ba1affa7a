use crate::domain::source::{Source, SourceRepository};
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

fn source(name: &str, url: &str, icon: &str, category: &str) -> Source {
    Source {
        name: name.to_string(),
        url: url.to_string(),
        icon: Some(icon.to_string()),
        category: category.to_string(),
    }
}

static SOURCES: LazyLock<Vec<Source>> = LazyLock::new(|| {
    vec![
        // Local news
        source(
            "The Philadelphia Inquirer",
            "https://www.inquirer.com/arc/outboundfeeds/rss/?outputType=xml",
            "https://www.inquirer.com/favicon.ico",
            "news",
        ),
        source(
            "PhillyVoice",
            "https://www.phillyvoice.com/feed/",
            "https://www.phillyvoice.com/favicon.ico",
            "news",
        ),
        source(
            "Billy Penn",
            "https://billypenn.com/feed/",
            "https://billypenn.com/favicon.ico",
            "news",
        ),
        source(
            "WHYY",
            "https://whyy.org/feed/",
            "https://whyy.org/favicon.ico",
            "news",
        ),
        source(
            "NBC10 Philadelphia",
            "https://www.nbcphiladelphia.com/?rss=y",
            "https://www.nbcphiladelphia.com/favicon.ico",
            "news",
        ),
        source(
            "CBS Philadelphia",
            "https://www.cbsnews.com/philadelphia/latest/rss/main",
            "https://www.cbsnews.com/favicon.ico",
            "news",
        ),
        // Sports
        source(
            "Crossing Broad",
            "https://www.crossingbroad.com/feed",
            "https://www.crossingbroad.com/favicon.ico",
            "sports",
        ),
        source(
            "PhillyVoice Sports",
            "https://www.phillyvoice.com/feed/section/sports/",
            "https://www.phillyvoice.com/favicon.ico",
            "sports",
        ),
        // Business & tech
        source(
            "Technical.ly Philly",
            "https://technical.ly/feed/",
            "https://technical.ly/favicon.ico",
            "business",
        ),
        source(
            "Philadelphia Business Journal",
            "https://feeds.bizjournals.com/bizj_philadelphia",
            "https://www.bizjournals.com/favicon.ico",
            "business",
        ),
        // Culture & food
        source(
            "Philadelphia Magazine",
            "https://www.phillymag.com/feed/",
            "https://www.phillymag.com/favicon.ico",
            "culture",
        ),
        source(
            "Eater Philly",
            "https://philly.eater.com/rss/index.xml",
            "https://philly.eater.com/favicon.ico",
            "culture",
        ),
    ]
});

/// Built-in catalog of Philadelphia-area feeds
pub struct HardcodedSourceRepository;

impl HardcodedSourceRepository {
    pub fn new() -> Self {
        debug_assert!(
            has_unique_names(&SOURCES),
            "Source names must be unique"
        );
        Self
    }
}

impl Default for HardcodedSourceRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceRepository for HardcodedSourceRepository {
    fn get_all_sources(&self) -> Vec<Source> {
        SOURCES.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceFileError {
    #[error("failed to read sources file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse sources file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid source catalog: {0}")]
    Invalid(String),
}

/// Catalog loaded from a JSON array of sources at startup
pub struct FileSourceRepository {
    sources: Vec<Source>,
}

impl FileSourceRepository {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceFileError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, SourceFileError> {
        let sources: Vec<Source> = serde_json::from_str(json)?;

        if let Some(bad) = sources
            .iter()
            .find(|s| s.name.trim().is_empty() || s.url.trim().is_empty())
        {
            return Err(SourceFileError::Invalid(format!(
                "source {:?} must have a name and url",
                bad.name
            )));
        }
        if !has_unique_names(&sources) {
            return Err(SourceFileError::Invalid(
                "source names must be unique".to_string(),
            ));
        }

        Ok(Self { sources })
    }
}

impl SourceRepository for FileSourceRepository {
    fn get_all_sources(&self) -> Vec<Source> {
        self.sources.clone()
    }
}

fn has_unique_names(sources: &[Source]) -> bool {
    let mut seen: HashSet<&str> = HashSet::new();
    sources.iter().all(|s| seen.insert(s.name.as_str()))
}
