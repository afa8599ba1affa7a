use philly_news_backend::domain::news::{NewsItem, PaginatedResult};

pub fn assert_news_item(item: &NewsItem) {
    assert!(!item.id.is_empty(), "Missing id");
    assert!(!item.title.is_empty(), "Missing title");
    assert!(!item.link.is_empty(), "Missing link");
    assert!(!item.source.is_empty(), "Missing source");
    assert!(!item.author.is_empty(), "Missing author");
    assert!(
        item.description.chars().count() <= 203,
        "Description not truncated: {}",
        item.description
    );
}

pub fn assert_sorted_newest_first(items: &[NewsItem]) {
    for pair in items.windows(2) {
        assert!(
            pair[0].pub_date >= pair[1].pub_date,
            "Items out of order: '{}' ({}) before '{}' ({})",
            pair[0].title,
            pair[0].pub_date,
            pair[1].title,
            pair[1].pub_date
        );
    }
}

pub fn assert_fallback(result: &PaginatedResult) {
    assert_eq!(result.items.len(), 3, "Fallback should carry 3 placeholders");
    assert_eq!(result.pagination.total_pages, 1);
    assert_eq!(result.pagination.current_page, 1);
    assert!(!result.pagination.has_next_page);
    assert!(!result.pagination.has_previous_page);
    for item in &result.items {
        assert_news_item(item);
    }
}
