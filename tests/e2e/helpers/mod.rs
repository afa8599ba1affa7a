use axum::{http::StatusCode, routing::get, Router};
use chrono::Duration as ChronoDuration;
use philly_news_backend::{
    controllers::{news::NewsController, sources::SourcesController},
    domain::{news::NewsService, source::Source, source::SourceRepository},
    infrastructure::{
        config::{Config, Environment, LogFormat},
        http::create_router,
        repositories::{FileSourceRepository, HttpFeedRepository},
    },
};
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod assertions;
pub mod fixtures;

use api_client::TestClient;
use fixtures::{atom_feed, healthy_items, many_items, rss_feed, FixtureItem};

/// Per-source deadline used by every test app
pub const TEST_FEED_TIMEOUT_MS: u64 = 500;

pub struct TestContext {
    pub config: Config,
    pub feed_server_url: String,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let config = Config {
                host: "127.0.0.1".to_string(),
                port: 0, // Will be assigned by the OS
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                feed_timeout_ms: TEST_FEED_TIMEOUT_MS,
                retention_days: 7,
                default_items_per_page: 12,
                max_items_per_page: 100,
                feed_cache_ttl_secs: 0, // Disable cache in tests to avoid test pollution
                feed_user_agent: "philly-news-e2e".to_string(),
                sources_file: None,
            };

            let feed_server_url = serve(fake_feed_server()).await;

            Self {
                config,
                feed_server_url,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Servers are dropped with the runtime
        }
    }
}

impl TestContext {
    /// A source pointing at a path on the fake feed server
    pub fn source(&self, name: &str, path: &str, category: &str) -> Source {
        Source {
            name: name.to_string(),
            url: format!("{}{}", self.feed_server_url, path),
            icon: Some(format!("{}/favicon.ico", self.feed_server_url)),
            category: category.to_string(),
        }
    }

    /// Start the real application wired to the given sources
    pub async fn spawn_app(&self, sources: Vec<Source>) -> TestClient {
        let json = serde_json::to_string(&sources).expect("Failed to serialize sources");
        let source_repo: Arc<dyn SourceRepository> =
            Arc::new(FileSourceRepository::from_json(&json).expect("Invalid test sources"));

        let feed_repo = Arc::new(HttpFeedRepository::new(
            self.config.feed_user_agent.clone(),
            self.config.feed_cache_ttl(),
        ));
        let news_service = Arc::new(NewsService::new(
            source_repo.clone(),
            feed_repo,
            self.config.feed_timeout(),
            self.config.retention_days,
        ));
        let news_controller = Arc::new(NewsController::new(
            news_service,
            self.config.default_items_per_page,
            self.config.max_items_per_page,
        ));
        let sources_controller = Arc::new(SourcesController::new(source_repo.clone()));

        let app = create_router(source_repo, news_controller, sources_controller);
        let base_url = serve(app).await;

        TestClient::new(&base_url)
    }
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn xml(body: String) -> ([(&'static str, &'static str); 1], String) {
    ([("content-type", "application/rss+xml; charset=utf-8")], body)
}

/// Canned feeds covering the healthy and failing cases
fn fake_feed_server() -> Router {
    Router::new()
        .route("/healthy.xml", get(|| async { xml(rss_feed(&healthy_items())) }))
        .route("/many.xml", get(|| async { xml(rss_feed(&many_items())) }))
        .route(
            "/atom.xml",
            get(|| async {
                xml(atom_feed(&[FixtureItem::new("Atom story", ChronoDuration::minutes(90))]))
            }),
        )
        .route(
            "/thumbnail.xml",
            get(|| async {
                xml(rss_feed(&[FixtureItem::new("Thumbnail only", ChronoDuration::hours(1))
                    .with_extra(r#"<media:thumbnail url="https://img.example.com/thumb.jpg" width="144" height="81"/>"#)]))
            }),
        )
        .route(
            "/mixed-age.xml",
            get(|| async {
                xml(rss_feed(&[
                    FixtureItem::new("Fresh story", ChronoDuration::days(1)),
                    FixtureItem::new("Stale story", ChronoDuration::days(8)),
                ]))
            }),
        )
        .route(
            "/messy.xml",
            get(|| async {
                xml(rss_feed(&[FixtureItem::new("Messy story", ChronoDuration::hours(1))
                    .with_extra(
                        "<description><![CDATA[<p>Rock & roll \u{1} at <b>the Spectrum</b></p>]]></description>\
                         <!-- tracking comment -->\
                         <dc:creator>Pat Writer</dc:creator>",
                    )]))
            }),
        )
        .route(
            "/slow.xml",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(TEST_FEED_TIMEOUT_MS * 6)).await;
                xml(rss_feed(&healthy_items()))
            }),
        )
        .route(
            "/error.xml",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route(
            "/broken.xml",
            get(|| async { xml("<rss><channel><item><title>Broken</item></channel>".to_string()) }),
        )
}
