mod mocks;

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use blog_script_gen::api::routes::create_router;
use blog_script_gen::config::Config;
use blog_script_gen::pipeline::Pipeline;
use blog_script_gen::summarizer::Summarizer;
use blog_script_gen::AppState;
use mocks::{loader::MockLoader, model::MockModel};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        server_addr: "127.0.0.1:0".parse().unwrap(),
        openrouter_api_key: "test-key".to_string(),
        model_name: "mock-model".to_string(),
        base_url: "http://localhost".to_string(),
        summary_pacing: Duration::ZERO,
        site_url: None,
        site_name: None,
    }
}

fn app() -> axum::Router {
    app_with(MockModel::default())
}

fn app_with(model: MockModel) -> axum::Router {
    let loader = MockLoader::default().with_page("https://example.com/post", "Example Post", "Some content.");
    let pipeline = Pipeline::new(
        Arc::new(model),
        Arc::new(loader),
        Summarizer::new(Duration::ZERO),
    );
    create_router(AppState::new(test_config(), pipeline))
}

async fn post_generate(body: Value) -> (StatusCode, Value) {
    let response = app()
        .oneshot(
            Request::post("/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn index_serves_html() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/generate"));
}

#[tokio::test]
async fn generate_returns_results_in_order() {
    let (status, body) = post_generate(json!({
        "urls": ["https://example.com/post", "https://example.com/missing"],
        "speakers": [{"name": "Alex", "role": "Host", "background": "Tech journalist", "style": "casual"}],
        "duration_minutes": 5
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 2);

    assert_eq!(results[0]["title"], "Example Post");
    assert_eq!(results[0]["url"], "https://example.com/post");
    assert!(results[0].get("error").is_none());
    assert!(results[0]["content"].as_str().unwrap().contains("[Alex]: "));

    assert_eq!(results[1]["url"], "https://example.com/missing");
    assert_eq!(results[1]["error"], "Failed to load blog content");
    assert_eq!(results[1]["content"], "");
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (status, _) = post_generate_raw("{\"urls\": 3}").await;
    assert!(status.is_client_error());
}

async fn post_generate_raw(body: &'static str) -> (StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(
            Request::post("/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn crashed_pipeline_is_a_timestamped_500() {
    let response = app_with(MockModel::panicking())
        .oneshot(
            Request::post("/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "urls": ["https://example.com/post"],
                        "speakers": [{"name": "Alex", "role": "Host", "background": "Tech journalist", "style": "casual"}],
                        "duration_minutes": 5
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));
    assert!(body["timestamp"].as_str().is_some());
}
