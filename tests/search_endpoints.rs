// tests/search_endpoints.rs
//! `/health`, `/search` and the request guard, end to end through the router.

mod common;

use axum::http::StatusCode;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn dune_volume() -> serde_json::Value {
    json!({
        "items": [{
            "id": "B1hSG45JCX4C",
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "publishedDate": "1965-08-01",
                "industryIdentifiers": [
                    {"type": "ISBN_10", "identifier": "0441013597"},
                    {"type": "ISBN_13", "identifier": "9780441013593"}
                ],
                "imageLinks": {"thumbnail": "http://books.google.com/dune.jpg"},
                "description": "Arrakis.",
                "publisher": "Ace",
                "mainCategory": "Fiction",
                "categories": ["Fiction / Science Fiction"],
                "pageCount": 412
            }
        }, {
            "id": "bare"
        }]
    })
}

#[tokio::test]
async fn health_is_open_even_with_an_api_key() {
    let upstreams = Upstreams::start().await;
    let app = app(&with(upstreams.base_vars(), &[("API_KEY", API_KEY)]));

    let (status, body) = send(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn search_requires_the_api_key_when_configured() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&upstreams.catalog)
        .await;
    let app = app(&with(upstreams.base_vars(), &[("API_KEY", API_KEY)]));

    let (status, body) = send(&app, get("/search?q=dune", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"detail": "Invalid API key"}));

    let (status, _) = send(&app, get("/search?q=dune", Some("wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&app, get("/search?q=dune", Some(API_KEY))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"query": "dune", "results": []}));
}

#[tokio::test]
async fn search_normalizes_catalog_volumes() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .and(query_param("q", "dune"))
        .and(query_param("maxResults", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dune_volume()))
        .expect(1)
        .mount(&upstreams.catalog)
        .await;
    let app = app(&upstreams.base_vars());

    let (status, body) = send(&app, get("/search?q=dune&max_results=50", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["query"], "dune");
    assert_eq!(
        body["results"][0],
        json!({
            "google_books_id": "B1hSG45JCX4C",
            "title": "Dune",
            "authors": ["Frank Herbert"],
            "published": "1965-08-01",
            "isbn": "9780441013593",
            "cover_url": "https://books.google.com/dune.jpg",
            "description": "Arrakis.",
            "publisher": "Ace",
            "mainCategory": "Fiction",
            "categories": ["Fiction / Science Fiction"],
            "page_count": 412
        })
    );
    assert_eq!(body["results"][1]["title"], "Untitled");
    assert_eq!(body["results"][1]["authors"], json!([]));
    assert_eq!(body["results"][1]["isbn"], json!(null));
}

#[tokio::test]
async fn search_forwards_the_catalog_key_and_default_count() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .and(query_param("maxResults", "10"))
        .and(query_param("key", "books-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"totalItems": 0})))
        .expect(1)
        .mount(&upstreams.catalog)
        .await;
    let app = app(&with(
        upstreams.base_vars(),
        &[("GOOGLE_BOOKS_API_KEY", "books-key")],
    ));

    let (status, body) = send(&app, get("/search?q=dune", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"], json!([]));
}

#[tokio::test]
async fn blank_or_missing_query_is_422_without_a_catalog_call() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstreams.catalog)
        .await;
    let app = app(&upstreams.base_vars());

    for uri in ["/search", "/search?q=", "/search?q=%20%20", "/search?q=dune&max_results=many"] {
        let (status, body) = send(&app, get(uri, None)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert!(body["detail"].is_string());
    }
}

#[tokio::test]
async fn catalog_failure_is_502_without_the_upstream_body() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("quota exhausted for project 42"))
        .mount(&upstreams.catalog)
        .await;
    let app = app(&upstreams.base_vars());

    let (status, body) = send(&app, get("/search?q=dune", None)).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"detail": "Google Books API error"}));
}

#[tokio::test]
async fn third_request_in_a_minute_is_throttled() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(2)
        .mount(&upstreams.catalog)
        .await;
    let app = app(&with(upstreams.base_vars(), &[("RATE_LIMIT_PER_MIN", "2")]));

    for _ in 0..2 {
        let (status, _) = send(&app, get("/search?q=dune", None)).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = send(&app, get("/search?q=dune", None)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, json!({"detail": "Rate limit exceeded"}));

    let (status, _) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn zero_rate_limit_disables_throttling() {
    let upstreams = Upstreams::start().await;
    Mock::given(method("GET"))
        .and(path(CATALOG_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&upstreams.catalog)
        .await;
    let app = app(&with(upstreams.base_vars(), &[("RATE_LIMIT_PER_MIN", "0")]));

    for _ in 0..5 {
        let (status, _) = send(&app, get("/search?q=dune", None)).await;
        assert_eq!(status, StatusCode::OK);
    }
}
