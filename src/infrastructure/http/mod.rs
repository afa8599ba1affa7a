use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{
    controllers::{health, news::NewsController, sources::SourcesController},
    domain::source::SourceRepository,
    error::not_found,
    infrastructure::{config::Config, middleware::request_id_middleware},
};

/// Build the application router with all routes configured
pub fn create_router(
    source_repo: Arc<dyn SourceRepository>,
    news_controller: Arc<NewsController>,
    sources_controller: Arc<SourcesController>,
) -> Router {
    // News routes (public, read-only)
    let news_routes = Router::new()
        .route("/api/news", get(NewsController::get_news))
        .route("/news", get(NewsController::get_news))
        .with_state(news_controller);

    // Source catalog routes
    let source_routes = Router::new()
        .route("/api/sources", get(SourcesController::list_sources))
        .route("/api/categories", get(SourcesController::list_categories))
        .with_state(sources_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(source_repo)
        .merge(news_routes)
        .merge(source_routes)
        .fallback(not_found)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn start_http_server(config: &Config, app: Router) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
