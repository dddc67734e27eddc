//! HTTP API tests against a mocked page query service and shop

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use httpmock::prelude::*;
use product_scraper::{create_router, AgentQlClient, AppState, ScrapeEngine, ServiceConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt; // for `oneshot`

fn create_test_app(agentql: &MockServer, shop: &MockServer) -> Result<Router> {
    let config = ServiceConfig {
        agentql_api_key: Some("test-key".to_string()),
        agentql_endpoint: agentql.url("/v1/query-data"),
        search_base_url: shop.url("/index.php"),
        ..Default::default()
    };

    let client = AgentQlClient::new(
        config.agentql_endpoint.clone(),
        "test-key".to_string(),
        "fast".to_string(),
        Duration::from_secs(5),
    )?;
    let engine = ScrapeEngine::new(Arc::new(client), &config)?;

    Ok(create_router(AppState::new(engine)))
}

fn mock_listing<'a>(server: &'a MockServer, names: &[&str]) -> httpmock::Mock<'a> {
    let products: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "product_name": name,
                "product_link": format!("https://shop.test/p/{}", name),
                "product_img": format!("https://shop.test/img/{}.jpg", name)
            })
        })
        .collect();

    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/query-data")
            .header("X-API-Key", "test-key")
            .body_contains("products(the first 5)");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({ "data": { "products": products }, "metadata": {} }));
    })
}

fn mock_details<'a>(server: &'a MockServer, url: &str, data: Value) -> httpmock::Mock<'a> {
    let partial = json!({ "url": url }).to_string();
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1/query-data")
            .body_contains("Max_Puff")
            .json_body_partial(partial.as_str());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({ "data": data, "metadata": {} }));
    })
}

async fn read_json(response: axum::response::Response) -> Result<Value> {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&body)?)
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let agentql = MockServer::start();
    let shop = MockServer::start();
    let app = create_test_app(&agentql, &shop)?;

    let request = Request::builder().uri("/health").body(Body::empty())?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await?;
    assert_eq!(body["status"], "ok");
    assert!(body["uptime_seconds"].as_i64().is_some());

    Ok(())
}

#[tokio::test]
async fn test_scrape_skips_known_products() -> Result<()> {
    let agentql = MockServer::start();
    let shop = MockServer::start();
    let listing = mock_listing(&agentql, &["alpha", "beta", "gamma"]);
    let alpha = mock_details(
        &agentql,
        "https://shop.test/p/alpha",
        json!({ "Battery": "650mAh", "Max_Puff": "15000", "Display": "LED" }),
    );
    let beta = mock_details(&agentql, "https://shop.test/p/beta", json!({}));
    let gamma = mock_details(
        &agentql,
        "https://shop.test/p/gamma",
        json!({ "Nicotine": "5%", "E_liquid_Capacity": "16ml" }),
    );
    let app = create_test_app(&agentql, &shop)?;

    let request = Request::builder()
        .method("POST")
        .uri("/scrape?url=https%3A%2F%2Fshop.test%2Fdisposables")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"["beta"]"#))?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await?;
    let products = body.as_array().expect("array response");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["name"], "alpha");
    assert_eq!(products[0]["Battery"], "650mAh");
    assert!(products[0]["Nicotine"].is_null());
    assert_eq!(products[1]["name"], "gamma");
    assert_eq!(products[1]["E_liquid_Capacity"], "16ml");

    listing.assert();
    alpha.assert();
    gamma.assert();
    beta.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_scrape_without_body_fetches_everything() -> Result<()> {
    let agentql = MockServer::start();
    let shop = MockServer::start();
    mock_listing(&agentql, &["solo"]);
    mock_details(&agentql, "https://shop.test/p/solo", json!({ "Battery": "1" }));
    let app = create_test_app(&agentql, &shop)?;

    let request = Request::builder()
        .method("POST")
        .uri("/scrape?url=https://shop.test/disposables")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(1));

    Ok(())
}

#[tokio::test]
async fn test_scrape_requires_url() -> Result<()> {
    let agentql = MockServer::start();
    let shop = MockServer::start();
    let app = create_test_app(&agentql, &shop)?;

    let request = Request::builder()
        .method("POST")
        .uri("/scrape")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await?;
    assert!(body["detail"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_scrape_rejects_non_http_url() -> Result<()> {
    let agentql = MockServer::start();
    let shop = MockServer::start();
    let app = create_test_app(&agentql, &shop)?;

    let request = Request::builder()
        .method("POST")
        .uri("/scrape?url=ftp://shop.test/list")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

#[tokio::test]
async fn test_scrape_listing_failure_is_500_with_detail() -> Result<()> {
    let agentql = MockServer::start();
    let shop = MockServer::start();
    agentql.mock(|when, then| {
        when.method(POST).path("/v1/query-data");
        then.status(503).body("service unavailable");
    });
    let app = create_test_app(&agentql, &shop)?;

    let request = Request::builder()
        .method("POST")
        .uri("/scrape?url=https://shop.test/disposables")
        .body(Body::empty())?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await?;
    let detail = body["detail"].as_str().unwrap_or_default();
    assert!(detail.contains("503"));
    assert!(detail.contains("service unavailable"));

    Ok(())
}

#[tokio::test]
async fn test_search_redirect_returns_single_product() -> Result<()> {
    let agentql = MockServer::start();
    let shop = MockServer::start();
    let search_page = shop.mock(|when, then| {
        when.method(GET)
            .path("/index.php")
            .query_param("search", "pulse");
        then.status(302).header("Location", "/geek-bar-pulse");
    });

    let product_url = shop.url("/geek-bar-pulse");
    let details = mock_details(&agentql, &product_url, json!({ "Max_Puff": "15000" }));
    let info_partial = json!({ "url": product_url }).to_string();
    let info = agentql.mock(|when, then| {
        when.method(POST)
            .path("/v1/query-data")
            .body_contains("product_name")
            .json_body_partial(info_partial.as_str());
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "data": {
                    "product_name": "Geek Bar Pulse",
                    "product_link": product_url,
                    "product_img": "https://shop.test/img/pulse.jpg"
                },
                "metadata": {}
            }));
    });
    let app = create_test_app(&agentql, &shop)?;

    let request = Request::builder()
        .method("POST")
        .uri("/search-and-scrape")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "search_keyword": "pulse" }).to_string(),
        ))?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(1));
    assert_eq!(body[0]["name"], "Geek Bar Pulse");
    assert_eq!(body[0]["Max_Puff"], "15000");

    search_page.assert();
    details.assert();
    info.assert();

    Ok(())
}

#[tokio::test]
async fn test_search_without_redirect_scrapes_results() -> Result<()> {
    let agentql = MockServer::start();
    let shop = MockServer::start();
    shop.mock(|when, then| {
        when.method(GET).path("/index.php");
        then.status(200).body("<html>search results</html>");
    });
    let listing = mock_listing(&agentql, &["one", "two"]);
    mock_details(&agentql, "https://shop.test/p/one", json!({ "Battery": "1" }));
    let two = mock_details(&agentql, "https://shop.test/p/two", json!({ "Battery": "2" }));
    let app = create_test_app(&agentql, &shop)?;

    let request = Request::builder()
        .method("POST")
        .uri("/search-and-scrape")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "search_keyword": "bar", "existing_product_names": ["two"] }).to_string(),
        ))?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await?;
    assert_eq!(body.as_array().map(|a| a.len()), Some(1));
    assert_eq!(body[0]["name"], "one");

    listing.assert();
    two.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_search_with_malformed_body_is_422() -> Result<()> {
    let agentql = MockServer::start();
    let shop = MockServer::start();
    let app = create_test_app(&agentql, &shop)?;

    let request = Request::builder()
        .method("POST")
        .uri("/search-and-scrape")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"existing_product_names": []}"#))?;
    let response = app.oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await?;
    assert!(body["detail"].as_str().unwrap_or_default().contains("search_keyword"));

    Ok(())
}
