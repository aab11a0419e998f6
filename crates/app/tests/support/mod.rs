//! Shared helpers for driving the app router in-process
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{header, Request, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

use cover_store::CoverStore;
use pudding_blog::daemon::auth::StaticTokenVerifier;
use pudding_blog::daemon::database::Database;
use pudding_blog::http_server::app_router;
use pudding_blog::ServiceState;

pub const TOKEN: &str = "test-admin-token";
pub const COVER_BASE: &str = "http://covers.test/covers/";

/// A fake cover key, valid as stored text but never uploaded
pub const COVER_KEY: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Router over an in-memory database and cover store
pub async fn setup_app() -> (Router, Database) {
    let database = Database::in_memory().await.unwrap();
    let covers = CoverStore::memory(Url::parse(COVER_BASE).unwrap())
        .await
        .unwrap();
    let auth = Arc::new(StaticTokenVerifier::new([TOKEN]));

    let state = ServiceState::new(database.clone(), covers, auth);
    (app_router(state), database)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub async fn get_json<T: DeserializeOwned>(app: &Router, uri: &str) -> (StatusCode, T) {
    let request = Request::get(uri)
        .header(header::ACCEPT, "application/json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn get_html(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::get(uri)
        .header(header::ACCEPT, "text/html")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    (status, String::from_utf8(body).unwrap())
}

/// Send a JSON body with an optional bearer token
pub async fn write_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();

    let (status, body) = send(app, request).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::delete(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    let (status, body) = send(app, builder.body(Body::empty()).unwrap()).await;
    (status, serde_json::from_slice(&body).unwrap())
}

pub async fn create_category(app: &Router, name: &str) -> Value {
    let (status, body) = write_json(
        app,
        "POST",
        "/admin/categories",
        Some(TOKEN),
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

pub fn post_body(title: &str, category_ids: &[&Value]) -> Value {
    serde_json::json!({
        "title": title,
        "content": "とろける<b>なめらか</b>食感",
        "coverImageKey": COVER_KEY,
        "categoryIds": category_ids.iter().map(|c| c["id"].clone()).collect::<Vec<_>>(),
        "shopName": "プリン堂",
        "businessHours": "10:00-18:00",
        "phoneNumber": "03-0000-0000",
    })
}

pub async fn create_post(app: &Router, title: &str, categories: &[&Value]) -> Value {
    let (status, body) = write_json(
        app,
        "POST",
        "/admin/posts",
        Some(TOKEN),
        post_body(title, categories),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

/// Category names attached to a post, sorted
pub fn category_names(post: &Value) -> Vec<String> {
    let mut names: Vec<String> = post["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    names
}

/// Raw multipart body with a single `file` field
pub fn multipart_file(boundary: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"cover.png\"\r\n",
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}
