use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

use recommendi_api::api::{create_router, AppState};
use recommendi_api::config::{Config, DataSource};
use recommendi_api::services::MockProvider;

fn create_test_server() -> TestServer {
    let config = Config {
        data_source: DataSource::Mock,
        ..Config::default()
    };
    let provider = MockProvider::new(config.per_page).unwrap();
    let state = AppState::new(config, Arc::new(provider));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

/// `name=value` pair from a response's Set-Cookie header
fn session_cookie(response: &TestResponse) -> HeaderValue {
    let set_cookie = response.header(header::SET_COOKIE);
    let pair = set_cookie.to_str().unwrap().split(';').next().unwrap().to_string();
    HeaderValue::from_str(&pair).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_index_serves_shell() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("<title>Recommendi</title>"));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let response = server
        .get("/health")
        .add_header(
            header::HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("trace-abc"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "trace-abc");
}

#[tokio::test]
async fn test_categories() {
    let server = create_test_server();
    let response = server.get("/api/categories").await;
    response.assert_status_ok();

    let categories: Vec<Value> = response.json();
    let names: Vec<&str> = categories
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Movies", "Books", "Places", "TV Shows"]);
    assert_eq!(categories[1]["value"], "Books");
    assert!(categories[1]["label"].as_str().unwrap().contains("book"));
    assert!(categories[1]["placeholder"].as_str().unwrap().starts_with("e.g."));
}

#[tokio::test]
async fn test_create_session_is_idempotent_per_client() {
    let server = create_test_server();

    let first = server
        .post("/api/create_session")
        .json(&json!({ "category": "Books" }))
        .await;
    first.assert_status_ok();
    let first_id = first.json::<Value>()["session_id"].as_str().unwrap().to_string();
    let cookie = session_cookie(&first);

    let second = server
        .post("/api/create_session")
        .add_header(header::COOKIE, cookie)
        .json(&json!({ "category": "Books" }))
        .await;
    second.assert_status_ok();
    assert_eq!(second.json::<Value>()["session_id"], first_id.as_str());
}

#[tokio::test]
async fn test_create_session_without_cookie_issues_new_id() {
    let server = create_test_server();
    let first: Value = server.post("/api/create_session").json(&json!({})).await.json();
    let second: Value = server.post("/api/create_session").json(&json!({})).await.json();
    assert_ne!(first["session_id"], second["session_id"]);
}

#[tokio::test]
async fn test_reset_session_forgets_the_session() {
    let server = create_test_server();

    let created = server.post("/api/create_session").json(&json!({})).await;
    let first_id = created.json::<Value>()["session_id"].clone();
    let cookie = session_cookie(&created);

    let reset = server
        .post("/api/reset_session")
        .add_header(header::COOKIE, cookie.clone())
        .await;
    reset.assert_status_ok();
    let body: Value = reset.json();
    assert_eq!(body["status"], "success");
    assert!(body["message"].is_string());

    let recreated: Value = server
        .post("/api/create_session")
        .add_header(header::COOKIE, cookie)
        .json(&json!({}))
        .await
        .json();
    assert_ne!(recreated["session_id"], first_id);
}

#[tokio::test]
async fn test_update_session() {
    let server = create_test_server();
    let response = server
        .post("/api/update_session")
        .json(&json!({
            "session_id": "8a1c6f0e-3f5e-4d0b-9a51-6f3b8b1f2c44",
            "full_message": "like The Great Gatsby"
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "success", "session_id": "8a1c6f0e-3f5e-4d0b-9a51-6f3b8b1f2c44" })
    );
}

#[tokio::test]
async fn test_update_session_requires_session_id() {
    let server = create_test_server();
    let response = server
        .post("/api/update_session")
        .json(&json!({ "full_message": "like The Great Gatsby" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Session ID is required" })
    );
}

#[tokio::test]
async fn test_recommendations_by_tag() {
    let server = create_test_server();
    let response = server
        .get("/api/recommendations?category=Books&page=1&search_type=tag&query=tag-book-classic&tag_name=Classic")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let items = body["recommendations"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    for item in items {
        let tags = item["tags"].as_array().unwrap();
        assert!(tags.iter().any(|tag| tag["id"] == "tag-book-classic"));
    }
    assert_eq!(body["has_next"], true);
    assert_eq!(body["next_page"], 2);
    assert_eq!(
        body["search_context"],
        json!({ "type": "tag", "query": "tag-book-classic", "name": "Classic" })
    );
    assert!(body["error_message"].is_null());

    let gatsby = &items[0];
    assert_eq!(gatsby["title"], "The Great Gatsby");
    assert_eq!(gatsby["author"], "F. Scott Fitzgerald");
    assert_eq!(gatsby["release_date_year"], "1925");
    assert_eq!(gatsby["genre"], "Classic");
    assert!(!gatsby["description"].as_str().unwrap().contains('<'));
    assert!(gatsby["extra_data"]
        .as_str()
        .unwrap()
        .starts_with("Publisher: Charles Scribner's Sons\nPage Count: 180"));
}

#[tokio::test]
async fn test_recommendations_second_page() {
    let server = create_test_server();
    let body: Value = server
        .get("/api/recommendations?category=Books&page=2&search_type=tag&query=tag-book-classic")
        .await
        .json();

    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
    assert_eq!(body["has_next"], false);
    assert_eq!(body["next_page"], 3);
    assert_eq!(body["search_context"]["name"], "Unknown Tag");
}

#[tokio::test]
async fn test_recommendations_default_category_is_movies() {
    let server = create_test_server();
    let body: Value = server.get("/api/recommendations").await.json();

    let items = body["recommendations"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["title"], "Heat");
    assert!(items[0]["extra_data"]
        .as_str()
        .unwrap()
        .contains("Where To Watch:\n  - name: Netflix, type: subscription"));
    assert_eq!(body["search_context"]["type"], "message");
}

#[tokio::test]
async fn test_recommendations_unknown_category() {
    let server = create_test_server();
    let response = server
        .get("/api/recommendations?category=Podcasts&query=true%20crime")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["recommendations"], json!([]));
    assert_eq!(body["has_next"], false);
    assert!(body["error_message"].is_null());
}

#[tokio::test]
async fn test_recommendations_invalid_page() {
    let server = create_test_server();
    let response = server.get("/api/recommendations?page=abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].as_str().unwrap().contains("page"));
}

#[tokio::test]
async fn test_tag_placeholder() {
    let server = create_test_server();
    let response = server.get("/tag/tag-book-classic").await;
    response.assert_status_ok();
    assert!(response
        .text()
        .contains("<h1>Searching for items with Tag ID: tag-book-classic</h1>"));
}

#[tokio::test]
async fn test_recommendations_last_representable_page() {
    let server = create_test_server();
    let response = server
        .get("/api/recommendations?category=Books&page=4294967295")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["recommendations"], json!([]));
    assert_eq!(body["has_next"], false);
    assert_eq!(body["next_page"], 4294967295u64);
}

#[tokio::test]
async fn test_cookieless_sessions_stay_bounded() {
    let config = Config {
        data_source: DataSource::Mock,
        max_sessions: 5,
        ..Config::default()
    };
    let provider = MockProvider::new(config.per_page).unwrap();
    let state = AppState::new(config, Arc::new(provider));
    let sessions = state.sessions.clone();
    let server = TestServer::new(create_router(state)).unwrap();

    for _ in 0..50 {
        server
            .post("/api/create_session")
            .json(&json!({}))
            .await
            .assert_status_ok();
    }

    assert_eq!(sessions.len().await, 5);
}

#[tokio::test]
async fn test_reset_with_forged_cookie_keeps_other_sessions() {
    let config = Config {
        data_source: DataSource::Mock,
        ..Config::default()
    };
    let provider = MockProvider::new(config.per_page).unwrap();
    let state = AppState::new(config, Arc::new(provider));
    let sessions = state.sessions.clone();
    let server = TestServer::new(create_router(state)).unwrap();

    let created: Value = server.post("/api/create_session").json(&json!({})).await.json();
    let victim = created["session_id"].as_str().unwrap().to_string();

    let forged = format!("recommendi_session={}.{}", victim, "0".repeat(64));
    server
        .post("/api/reset_session")
        .add_header(header::COOKIE, HeaderValue::from_str(&forged).unwrap())
        .await
        .assert_status_ok();

    let id: uuid::Uuid = victim.parse().unwrap();
    assert!(sessions.get(&id).await.is_some());
}
