use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::news::{NewsQuery, NewsServiceApi, PaginatedResult},
    error::AppResult,
};

// Request DTOs
#[derive(Debug, Default, Deserialize)]
pub struct GetNewsQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default, rename = "itemsPerPage")]
    pub items_per_page: Option<String>,
}

pub struct NewsController {
    news_service: Arc<dyn NewsServiceApi>,
    default_items_per_page: u32,
    max_items_per_page: u32,
}

impl NewsController {
    pub fn new(
        news_service: Arc<dyn NewsServiceApi>,
        default_items_per_page: u32,
        max_items_per_page: u32,
    ) -> Self {
        Self {
            news_service,
            default_items_per_page,
            max_items_per_page,
        }
    }

    /// GET /api/news - Aggregated, paginated news for an optional category
    pub async fn get_news(
        State(controller): State<Arc<NewsController>>,
        Query(query): Query<GetNewsQuery>,
    ) -> AppResult<Json<PaginatedResult>> {
        let query = controller.to_news_query(query);
        let result = controller.news_service.get_news(query).await?;
        Ok(Json(result))
    }

    /// Unparseable numbers fall back to defaults rather than rejecting the request
    fn to_news_query(&self, query: GetNewsQuery) -> NewsQuery {
        let page = parse_number(query.page.as_deref()).unwrap_or(1).max(1);
        let items_per_page = parse_number(query.items_per_page.as_deref())
            .unwrap_or(self.default_items_per_page as i64)
            .clamp(1, self.max_items_per_page.max(1) as i64);

        NewsQuery {
            category: query.category.filter(|c| !c.is_empty()),
            page: page.min(u32::MAX as i64) as u32,
            items_per_page: items_per_page as u32,
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
}
