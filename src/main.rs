use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use philly_news_backend::controllers::{news::NewsController, sources::SourcesController};
use philly_news_backend::domain::news::NewsService;
use philly_news_backend::domain::source::SourceRepository;
use philly_news_backend::infrastructure::config::{Config, LogFormat};
use philly_news_backend::infrastructure::http::{create_router, start_http_server};
use philly_news_backend::infrastructure::repositories::{
    FileSourceRepository, HardcodedSourceRepository, HttpFeedRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Philly News Backend on {}:{}",
        config.host,
        config.port
    );

    if config.is_development() {
        tracing::debug!(?config, "Loaded configuration");
    }

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    let source_repo: Arc<dyn SourceRepository> = match &config.sources_file {
        Some(path) => {
            tracing::info!(path = %path, "Loading feed sources from file");
            Arc::new(FileSourceRepository::from_path(path)?)
        }
        None => Arc::new(HardcodedSourceRepository::new()),
    };
    tracing::info!(
        sources = source_repo.get_all_sources().len(),
        categories = ?source_repo.list_categories(),
        "Source registry ready"
    );

    let feed_repo = Arc::new(HttpFeedRepository::new(
        config.feed_user_agent.clone(),
        config.feed_cache_ttl(),
    ));
    if config.feed_cache_ttl() == Duration::ZERO {
        tracing::info!("Feed body cache disabled");
    }

    // 2. Instantiate services
    let news_service = Arc::new(NewsService::new(
        source_repo.clone(),
        feed_repo,
        config.feed_timeout(),
        config.retention_days,
    ));

    // 3. Instantiate controllers
    let news_controller = Arc::new(NewsController::new(
        news_service,
        config.default_items_per_page,
        config.max_items_per_page,
    ));
    let sources_controller = Arc::new(SourcesController::new(source_repo.clone()));

    let app = create_router(source_repo, news_controller, sources_controller);

    start_http_server(&config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "philly_news_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
