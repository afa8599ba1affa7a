use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::source::{Source, SourceRepository};

// Request DTOs
#[derive(Debug, Deserialize)]
pub struct GetSourcesQuery {
    #[serde(default)]
    pub category: Option<String>,
}

// Response DTOs
#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<Source>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

pub struct SourcesController {
    source_repo: Arc<dyn SourceRepository>,
}

impl SourcesController {
    pub fn new(source_repo: Arc<dyn SourceRepository>) -> Self {
        Self { source_repo }
    }

    /// GET /api/sources - Configured feeds, optionally for one category
    pub async fn list_sources(
        State(controller): State<Arc<SourcesController>>,
        Query(query): Query<GetSourcesQuery>,
    ) -> Json<SourcesResponse> {
        let category = query.category.filter(|c| !c.is_empty());
        Json(SourcesResponse {
            sources: controller.source_repo.list_sources(category.as_deref()),
        })
    }

    /// GET /api/categories - Distinct source categories
    pub async fn list_categories(
        State(controller): State<Arc<SourcesController>>,
    ) -> Json<CategoriesResponse> {
        Json(CategoriesResponse {
            categories: controller.source_repo.list_categories(),
        })
    }
}
