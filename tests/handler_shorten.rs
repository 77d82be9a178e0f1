mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use tinylink::api::dto::shorten::ShortenResponse;
use tinylink::domain::repositories::LinkRepository;

#[tokio::test]
async fn test_shorten_generates_code() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: ShortenResponse = response.json();
    assert_eq!(body.code.len(), 6);
    assert!(body.code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body.short_url, format!("{}/{}", common::BASE_URL, body.code));

    let stored = repo.find_by_code(&body.code).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://example.com/some/long/path");
    assert_eq!(stored.clicks, 0);
}

#[tokio::test]
async fn test_shorten_with_custom_code() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "code": "my-page" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: ShortenResponse = response.json();
    assert_eq!(body.code, "my-page");
    assert_eq!(body.short_url, "http://sho.rt/my-page");
}

#[tokio::test]
async fn test_shorten_accepts_alternate_field_names() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "original_url": "https://example.com", "custom_code": "alt_names" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: ShortenResponse = response.json();
    assert_eq!(body.code, "alt_names");
}

#[tokio::test]
async fn test_shorten_duplicate_custom_code_conflict() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let first = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/1", "code": "my-page" }))
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/2", "code": "my-page" }))
        .await;

    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    let body: Value = second.json();
    assert_eq!(body["error"]["code"], "code_taken");
    assert_eq!(body["error"]["details"]["custom_code"], "my-page");
}

#[tokio::test]
async fn test_shorten_reserved_code_conflict() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    for reserved in ["api", "health", "healthz"] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": "https://example.com", "code": reserved }))
            .await;

        assert_eq!(response.status_code(), StatusCode::CONFLICT, "{reserved}");
    }
}

#[tokio::test]
async fn test_shorten_rejects_bad_urls() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    for url in [
        "javascript:alert(1)",
        "ftp://x.com",
        "not a url",
        "example.com",
        "https://",
        "",
    ] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": url }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{url}");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "invalid_url", "{url}");
    }

    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_shorten_rejects_bad_custom_codes() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let too_long = "a".repeat(33);
    for code in ["ab", "has space", "dots.not.allowed", "slash/code", too_long.as_str()] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": "https://example.com", "code": code }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{code}");
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "invalid_custom_code", "{code}");
    }

    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_shorten_blank_custom_code_generates_one() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "code": "  " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: ShortenResponse = response.json();
    assert_eq!(body.code.len(), 6);
}

#[tokio::test]
async fn test_shorten_unparseable_body_is_invalid_url() {
    let (state, _repo) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.post("/api/shorten").text("url=https://example.com").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_two_codes() {
    let (state, repo) = common::create_test_state();
    let server = common::test_server(state);

    let payload = json!({ "url": "https://example.com/dup" });
    let first: ShortenResponse = server.post("/api/shorten").json(&payload).await.json();
    let second: ShortenResponse = server.post("/api/shorten").json(&payload).await.json();

    assert_ne!(first.code, second.code);
    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_shorten_storage_failure_is_internal_error() {
    let state = tinylink::AppState::new(
        std::sync::Arc::new(common::DownStore),
        std::sync::Arc::new(tinylink::infrastructure::cache::NullCache::new()),
        tinylink::application::services::CodePolicy::default(),
        common::BASE_URL,
    );
    let server = common::test_server(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "internal_error");
    assert!(!body.to_string().contains("connection refused"));
}
