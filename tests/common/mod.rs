//! Test helpers for web API tests.
//!
//! Builds a TestServer over the full router with an in-memory database and
//! an image store rooted in a temporary directory.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use miniboard::web::handlers::AppState;
use miniboard::web::middleware::JwtState;
use miniboard::web::router::create_router;
use miniboard::{Database, LocalImageStore};
use serde_json::{json, Value};
use tempfile::TempDir;

pub const JWT_SECRET: &str = "test-secret-key-for-testing-only";

/// A running test application.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub images: TempDir,
}

/// Create a test server with an in-memory database.
pub async fn create_test_app() -> TestApp {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let images = tempfile::tempdir().expect("Failed to create image dir");
    let store = LocalImageStore::new(images.path(), "/images").expect("Failed to create store");

    let app_state = Arc::new(AppState::new(db.clone(), Arc::new(store), JWT_SECRET, 900));
    let jwt_state = Arc::new(JwtState::new(JWT_SECRET));

    let router = create_router(app_state, jwt_state, &[]);
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, db, images }
}

/// Sign up a member.
pub async fn signup(server: &TestServer, username: &str, password: &str, name: &str) -> TestResponse {
    server
        .post("/member/signup")
        .json(&json!({
            "username": username,
            "password": password,
            "name": name
        }))
        .await
}

/// Sign up and log in a member, returning the access token.
pub async fn login_as(server: &TestServer, username: &str, name: &str) -> String {
    signup(server, username, "password123", name)
        .await
        .assert_status_ok();

    let response = server
        .post("/member/login")
        .json(&json!({
            "username": username,
            "password": "password123"
        }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["data"]["access_token"]
        .as_str()
        .expect("access token")
        .to_string()
}

/// Bearer header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// A multipart post form with a small PNG image.
pub fn post_form(title: &str, content: &str, category: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("content", content.to_string())
        .add_text("category", category.to_string())
        .add_part(
            "image",
            Part::bytes(b"\x89PNG\r\n\x1a\nfake".to_vec())
                .file_name("photo.png")
                .mime_type("image/png"),
        )
}

/// Create a post and return its id.
pub async fn create_post(server: &TestServer, token: &str, title: &str, category: &str) -> i64 {
    let response = server
        .post("/board")
        .add_header(AUTHORIZATION, bearer(token))
        .multipart(post_form(title, "Some content", category))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["data"]["id"].as_i64().expect("post id")
}
