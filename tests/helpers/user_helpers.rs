use axum_test::{TestResponse, TestServer};
use blog_portal::{models::view::user::LoginView, utils::hash::hash_password};
use fake::{
    faker::{
        internet::en::SafeEmail,
        name::en::{FirstName, LastName},
    },
    Fake,
};
use serde_json::json;

use super::mock_backend::MockBackend;

pub const TEST_PASSWORD: &str = "some3242paSs#$";

#[allow(dead_code)]
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub username: String,
}

#[allow(dead_code)]
pub async fn register(server: &TestServer, email: &str) -> TestResponse {
    let firstname: String = FirstName().fake();
    let lastname: String = LastName().fake();
    server
        .post("/api/register")
        .json(&json!({
            "firstname": firstname,
            "lastname": lastname,
            "email": email,
            "password": TEST_PASSWORD,
            "confirm_password": TEST_PASSWORD,
        }))
        .await
}

#[allow(dead_code)]
pub async fn login(server: &TestServer, email_or_username: &str, password: &str) -> TestResponse {
    server
        .post("/api/login")
        .json(&json!({
            "email_or_username": email_or_username,
            "password": password,
        }))
        .await
}

/// Registers a fresh USER and leaves its session cookie on the server.
#[allow(dead_code)]
pub async fn create_fake_login_test_user(server: &TestServer) -> TestUser {
    let email: String = SafeEmail().fake();
    let email = format!("{}{}", unique_prefix(), email);
    register(server, &email).await.assert_status_success();

    let response = login(server, &email, TEST_PASSWORD).await;
    response.assert_status_ok();
    let login = response.json::<LoginView>();
    TestUser {
        id: login.user.id,
        email,
        username: login.user.username,
    }
}

/// Seeds an account with the given role straight into the backend and signs in.
#[allow(dead_code)]
pub async fn create_login_admin(server: &TestServer, backend: &MockBackend, role: &str) -> TestUser {
    let email = format!("{}-{}@blog.test", role.to_lowercase(), unique_prefix());
    let username = email.split('@').next().unwrap().to_string();
    let record = backend.seed(
        "users",
        json!({
            "username": username,
            "displayName": format!("{role} account"),
            "email": email,
            "password": hash_password(TEST_PASSWORD).unwrap(),
            "role": role,
            "status": "ACTIVE",
        }),
    );

    login(server, &email, TEST_PASSWORD).await.assert_status_ok();
    TestUser {
        id: record["id"].to_string(),
        email,
        username,
    }
}

// fake emails repeat often enough to trip the uniqueness check
fn unique_prefix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}
