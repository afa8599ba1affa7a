use super::error::{FeedError, NewsServiceError};
use super::fallback::fallback;
use super::model::{NewsItem, PaginatedResult};
use super::normalizer::normalize;
use super::pagination::paginate;
use super::recency::filter_recent;
use crate::domain::source::{Source, SourceRepository};
use crate::infrastructure::feed::{parse, sanitize};
use crate::infrastructure::repositories::FeedRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Parameters of one news page request, already defaulted and clamped
#[derive(Debug, Clone, PartialEq)]
pub struct NewsQuery {
    pub category: Option<String>,
    pub page: u32,
    pub items_per_page: u32,
}

pub struct NewsService {
    source_repo: Arc<dyn SourceRepository>,
    feed_repo: Arc<dyn FeedRepository>,
    fetch_timeout: Duration,
    retention_days: i64,
}

impl NewsService {
    pub fn new(
        source_repo: Arc<dyn SourceRepository>,
        feed_repo: Arc<dyn FeedRepository>,
        fetch_timeout: Duration,
        retention_days: i64,
    ) -> Self {
        Self {
            source_repo,
            feed_repo,
            fetch_timeout,
            retention_days,
        }
    }
}

#[async_trait]
pub trait NewsServiceApi: Send + Sync {
    /// Aggregate the sources of the requested category and return one page.
    ///
    /// Falls back to the placeholder page when nothing usable came back.
    async fn get_news(&self, query: NewsQuery) -> Result<PaginatedResult, NewsServiceError>;

    /// Run every source pipeline concurrently and merge the results, newest first.
    ///
    /// A failing or panicking source contributes nothing; only a cancelled
    /// pipeline task (runtime shutting down) is an error.
    async fn aggregate(&self, sources: Vec<Source>) -> Result<Vec<NewsItem>, NewsServiceError>;
}

#[async_trait]
impl NewsServiceApi for NewsService {
    async fn get_news(&self, query: NewsQuery) -> Result<PaginatedResult, NewsServiceError> {
        let sources = self.source_repo.list_sources(query.category.as_deref());

        tracing::info!(
            category = ?query.category,
            sources = sources.len(),
            page = query.page,
            items_per_page = query.items_per_page,
            "Aggregating news"
        );

        let items = self.aggregate(sources).await?;

        if items.is_empty() {
            tracing::warn!(category = ?query.category, "No usable items aggregated, serving fallback");
            return Ok(fallback(Utc::now()));
        }

        Ok(paginate(items, query.page, query.items_per_page))
    }

    async fn aggregate(&self, sources: Vec<Source>) -> Result<Vec<NewsItem>, NewsServiceError> {
        let started = Instant::now();
        let now = Utc::now();

        let names: Vec<String> = sources.iter().map(|s| s.name.clone()).collect();

        let handles: Vec<_> = sources
            .into_iter()
            .map(|source| {
                let feed_repo = self.feed_repo.clone();
                let timeout = self.fetch_timeout;
                let retention_days = self.retention_days;

                tokio::spawn(async move {
                    let result =
                        run_source_pipeline(feed_repo.as_ref(), &source, timeout, retention_days, now)
                            .await;
                    (source, result)
                })
            })
            .collect();

        // Wait for every pipeline before deciding anything
        let outcomes = futures::future::join_all(handles).await;

        let mut items = Vec::new();

        for (name, outcome) in names.into_iter().zip(outcomes) {
            match outcome {
                Ok((source, Ok(source_items))) => {
                    tracing::debug!(
                        source = %source.name,
                        items = source_items.len(),
                        "Source pipeline completed"
                    );
                    items.extend(source_items);
                }
                Ok((source, Err(e))) => {
                    tracing::warn!(
                        source = %source.name,
                        url = %source.url,
                        kind = e.kind(),
                        error = %e,
                        "Source pipeline failed, skipping source"
                    );
                }
                Err(join_error) if join_error.is_panic() => {
                    // A panicking source still only costs its own items
                    tracing::error!(
                        source = %name,
                        error = %join_error,
                        "Source pipeline panicked, skipping source"
                    );
                }
                Err(join_error) => {
                    tracing::error!(source = %name, error = %join_error, "Source pipeline task was cancelled");
                    return Err(NewsServiceError::Internal(format!(
                        "source pipeline cancelled: {}",
                        join_error
                    )));
                }
            }
        }

        sort_newest_first(&mut items);

        tracing::info!(
            items = items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Aggregation finished"
        );

        Ok(items)
    }
}

/// fetch → sanitize → parse → normalize → filter for a single source
async fn run_source_pipeline(
    feed_repo: &dyn FeedRepository,
    source: &Source,
    timeout: Duration,
    retention_days: i64,
    now: DateTime<Utc>,
) -> Result<Vec<NewsItem>, FeedError> {
    let raw_xml = feed_repo.fetch(source, timeout).await?;
    let entries = parse(&sanitize(&raw_xml))?;

    let parsed = entries.len();
    let items: Vec<NewsItem> = entries
        .iter()
        .filter_map(|entry| normalize(entry, source, now))
        .collect();

    if items.len() < parsed {
        tracing::debug!(
            source = %source.name,
            rejected = parsed - items.len(),
            "Dropped entries missing title or link"
        );
    }

    Ok(filter_recent(items, retention_days, now))
}

/// Descending by timestamp; stable, so equal dates keep arrival order
pub fn sort_newest_first(items: &mut [NewsItem]) {
    items.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
}
