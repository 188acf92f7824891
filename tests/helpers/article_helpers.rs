use axum_test::{TestResponse, TestServer};
use blog_portal::models::view::article::ArticleView;
use serde_json::{json, Value};

use super::mock_backend::MockBackend;

#[allow(dead_code)]
pub fn seed_category(backend: &MockBackend, name: &str) -> String {
    backend.seed("categories", json!({ "name": name }))["id"].to_string()
}

/// Puts an article straight into the backend with a fixed date.
#[allow(dead_code)]
pub fn seed_article(
    backend: &MockBackend,
    user_id: &str,
    category_id: &str,
    title: &str,
    status: &str,
    date: &str,
) -> Value {
    backend.seed(
        "articles",
        json!({
            "title": title,
            "entryId": category_id,
            "category": "Seeded",
            "userId": user_id,
            "content": format!("{title} content"),
            "mood": "happy",
            "status": status,
            "image": "",
            "date": date,
        }),
    )
}

#[allow(dead_code)]
pub async fn post_article(
    server: &TestServer,
    category_id: &str,
    title: &str,
    status: &str,
) -> TestResponse {
    server
        .post("/api/articles")
        .json(&json!({
            "title": title,
            "entryId": category_id,
            "content": format!("{title} body"),
            "mood": "grateful",
            "status": status,
        }))
        .await
}

#[allow(dead_code)]
pub async fn create_article(
    server: &TestServer,
    category_id: &str,
    title: &str,
    status: &str,
) -> ArticleView {
    let response = post_article(server, category_id, title, status).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<ArticleView>()
}
