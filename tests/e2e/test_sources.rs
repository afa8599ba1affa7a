use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_all_configured_sources(ctx: &TestContext) {
    let client = ctx
        .spawn_app(vec![
            ctx.source("Healthy", "/healthy.xml", "news"),
            ctx.source("Many", "/many.xml", "sports"),
            ctx.source("Atom", "/atom.xml", "news"),
        ])
        .await;

    let response = client.get("/api/sources").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    let names: Vec<&str> = body["sources"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|s| s["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Healthy", "Many", "Atom"]);

    let first = &body["sources"][0];
    assert!(first["url"].as_str().unwrap().ends_with("/healthy.xml"));
    assert_eq!(first["category"], "news");
    assert!(first["icon"].is_string());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_filter_sources_by_category(ctx: &TestContext) {
    let client = ctx
        .spawn_app(vec![
            ctx.source("Healthy", "/healthy.xml", "news"),
            ctx.source("Many", "/many.xml", "sports"),
        ])
        .await;

    let response = client.get("/api/sources?category=sports").await.unwrap();

    response.assert_status(StatusCode::OK);

    let sources = response.body.as_ref().unwrap()["sources"].as_array().unwrap().clone();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0]["name"], "Many");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_no_sources_for_unknown_category(ctx: &TestContext) {
    let client = ctx
        .spawn_app(vec![ctx.source("Healthy", "/healthy.xml", "news")])
        .await;

    let response = client.get("/api/sources?category=weather").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["sources"], Value::Array(vec![]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_distinct_categories_in_catalog_order(ctx: &TestContext) {
    let client = ctx
        .spawn_app(vec![
            ctx.source("One", "/healthy.xml", "sports"),
            ctx.source("Two", "/many.xml", "news"),
            ctx.source("Three", "/atom.xml", "sports"),
        ])
        .await;

    let response = client.get("/api/categories").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["categories"], serde_json::json!(["sports", "news"]));
}
