use super::model::{NewsItem, PaginatedResult, Pagination};

pub const DEFAULT_ITEMS_PER_PAGE: u32 = 12;

/// Slice the merged result set for one page.
///
/// `page` below 1 is clamped to 1, as is `items_per_page`. A page past the end
/// yields an empty slice while still reporting the requested page.
pub fn paginate(items: Vec<NewsItem>, page: u32, items_per_page: u32) -> PaginatedResult {
    let page = page.max(1);
    let items_per_page = items_per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(items_per_page as usize) as u32;

    let start_index = (page as usize - 1).saturating_mul(items_per_page as usize);
    let page_items: Vec<NewsItem> = items
        .into_iter()
        .skip(start_index)
        .take(items_per_page as usize)
        .collect();

    PaginatedResult {
        items: page_items,
        pagination: Pagination {
            current_page: page,
            total_pages,
            total_items,
            items_per_page,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
        },
    }
}
