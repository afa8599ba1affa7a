use super::model::{NewsItem, PaginatedResult, Pagination};
use chrono::{DateTime, Utc};

const FALLBACK_SOURCE: &str = "Philly News";
const FALLBACK_CATEGORY: &str = "general";

const PLACEHOLDERS: [(&str, &str); 3] = [
    (
        "Philadelphia news is on its way",
        "We couldn't reach our news sources right now. Fresh stories from around the city will appear here shortly.",
    ),
    (
        "Check back in a few minutes",
        "Local feeds refresh throughout the day. Reload the page in a little while to see the latest headlines.",
    ),
    (
        "Explore Philly by category",
        "Try another category to browse local news, sports, business, and culture coverage from across the region.",
    ),
];

/// Canned page returned when aggregation produced nothing usable.
/// Links point back at the news page itself.
pub fn fallback(now: DateTime<Utc>) -> PaginatedResult {
    let items: Vec<NewsItem> = PLACEHOLDERS
        .iter()
        .enumerate()
        .map(|(index, (title, description))| {
            let link = format!("/news#placeholder-{}", index + 1);
            NewsItem {
                id: link.clone(),
                title: title.to_string(),
                link,
                description: description.to_string(),
                pub_date: now,
                source: FALLBACK_SOURCE.to_string(),
                source_icon: None,
                category: FALLBACK_CATEGORY.to_string(),
                author: FALLBACK_SOURCE.to_string(),
                image_url: String::new(),
            }
        })
        .collect();

    let total_items = items.len();
    PaginatedResult {
        items,
        pagination: Pagination {
            current_page: 1,
            total_pages: 1,
            total_items,
            items_per_page: total_items as u32,
            has_next_page: false,
            has_previous_page: false,
        },
    }
}
