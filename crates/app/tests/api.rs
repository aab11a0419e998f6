//! End-to-end tests for the JSON API, driven through the app router.

mod support;

use axum::body::Body;
use http::{header, Request, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use support::*;

#[tokio::test]
async fn test_create_post_returns_submitted_categories() {
    let (app, _db) = setup_app().await;
    let pudding = create_category(&app, "プリン").await;
    let cafe = create_category(&app, "カフェ").await;

    let post = create_post(&app, "絶品プリン", &[&pudding, &cafe]).await;

    assert_eq!(post["title"], "絶品プリン");
    assert_eq!(post["coverImageKey"], COVER_KEY);
    assert_eq!(
        post["coverImage"],
        json!({ "key": COVER_KEY, "width": 800, "height": 600 })
    );
    assert_eq!(category_names(&post), vec!["カフェ", "プリン"]);
}

#[tokio::test]
async fn test_update_replaces_category_set() {
    let (app, _db) = setup_app().await;
    let pudding = create_category(&app, "プリン").await;
    let cafe = create_category(&app, "カフェ").await;
    let post = create_post(&app, "絶品プリン", &[&pudding, &cafe]).await;
    let id = post["id"].as_str().unwrap();

    let (status, detail): (_, Value) = get_json(&app, &format!("/posts/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(category_names(&detail), vec!["カフェ", "プリン"]);

    let (status, updated) = write_json(
        &app,
        "PUT",
        &format!("/admin/posts/{}", id),
        Some(TOKEN),
        post_body("絶品プリン", &[&cafe]),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", updated);
    assert_eq!(category_names(&updated), vec!["カフェ"]);

    let (_, detail): (_, Value) = get_json(&app, &format!("/posts/{}", id)).await;
    assert_eq!(category_names(&detail), vec!["カフェ"]);
}

#[tokio::test]
async fn test_update_missing_post_is_404() {
    let (app, _db) = setup_app().await;

    let (status, body) = write_json(
        &app,
        "PUT",
        &format!("/admin/posts/{}", Uuid::new_v4()),
        Some(TOKEN),
        post_body("どこにもない", &[]),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("post not found"));
}

#[tokio::test]
async fn test_delete_post_keeps_categories() {
    let (app, _db) = setup_app().await;
    let pudding = create_category(&app, "プリン").await;
    let post = create_post(&app, "絶品プリン", &[&pudding]).await;
    let id = post["id"].as_str().unwrap();

    let (status, body) = delete(&app, &format!("/admin/posts/{}", id), Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("絶品プリン"));

    let (status, _): (_, Value) = get_json(&app, &format!("/posts/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, categories): (_, Vec<Value>) = get_json(&app, "/categories").await;
    assert_eq!(categories.len(), 1);

    // deleting again reports the post as missing
    let (status, _) = delete(&app, &format!("/admin/posts/{}", id), Some(TOKEN)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_post_by_query() {
    let (app, _db) = setup_app().await;
    let post = create_post(&app, "焼きプリン", &[]).await;
    let id = post["id"].as_str().unwrap();

    let (status, body) = delete(&app, &format!("/admin/posts?id={}", id), Some(TOKEN)).await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let (_, posts): (_, Vec<Value>) = get_json(&app, "/posts").await;
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_unknown_category_rejected_without_writes() {
    let (app, _db) = setup_app().await;
    let ghost = json!({ "id": Uuid::new_v4() });

    let (status, body) = write_json(
        &app,
        "POST",
        "/admin/posts",
        Some(TOKEN),
        post_body("幻のプリン", &[&ghost]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("unknown category"));

    let (_, posts): (_, Vec<Value>) = get_json(&app, "/posts").await;
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_invalid_post_bodies_are_400() {
    let (app, _db) = setup_app().await;

    let blank_title = post_body("   ", &[]);
    let (status, _) = write_json(&app, "POST", "/admin/posts", Some(TOKEN), blank_title).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = write_json(
        &app,
        "POST",
        "/admin/posts",
        Some(TOKEN),
        json!({ "content": "title is missing" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid request body"));
}

#[tokio::test]
async fn test_list_is_newest_first_and_filterable() {
    let (app, _db) = setup_app().await;
    let pudding = create_category(&app, "プリン").await;
    let cafe = create_category(&app, "カフェ").await;

    create_post(&app, "一番目", &[&pudding]).await;
    create_post(&app, "二番目", &[&cafe]).await;
    create_post(&app, "三番目", &[&pudding, &cafe]).await;

    let (status, posts): (_, Vec<Value>) = get_json(&app, "/posts").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = posts.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["三番目", "二番目", "一番目"]);

    let uri = format!("/posts?category={}", pudding["id"].as_str().unwrap());
    let (_, posts): (_, Vec<Value>) = get_json(&app, &uri).await;
    let titles: Vec<&str> = posts.iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["三番目", "一番目"]);
}

#[tokio::test]
async fn test_writes_require_token() {
    let (app, _db) = setup_app().await;

    let (status, _) = write_json(
        &app,
        "POST",
        "/admin/categories",
        None,
        json!({ "name": "プリン" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = write_json(
        &app,
        "POST",
        "/admin/posts",
        Some("not-the-token"),
        post_body("絶品プリン", &[]),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    // auth runs before the body is looked at
    let (status, _) = write_json(&app, "POST", "/admin/posts", None, json!("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = delete(&app, &format!("/admin/posts/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, categories): (_, Vec<Value>) = get_json(&app, "/categories").await;
    assert!(categories.is_empty());
    let (_, posts): (_, Vec<Value>) = get_json(&app, "/posts").await;
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_category_name_rules() {
    let (app, _db) = setup_app().await;

    for name in ["", "あ", "あいうえおかきくけこさしすせそたち"] {
        let (status, _) = write_json(
            &app,
            "POST",
            "/admin/categories",
            Some(TOKEN),
            json!({ "name": name }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "name {:?}", name);
    }

    let pudding = create_category(&app, "プリン").await;
    let (status, body) = write_json(
        &app,
        "POST",
        "/admin/categories",
        Some(TOKEN),
        json!({ "name": " プリン " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    let cafe = create_category(&app, "カフェ").await;
    let (status, _) = write_json(
        &app,
        "PUT",
        &format!("/admin/categories/{}", cafe["id"].as_str().unwrap()),
        Some(TOKEN),
        json!({ "name": "プリン" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, renamed) = write_json(
        &app,
        "PUT",
        &format!("/admin/categories/{}", pudding["id"].as_str().unwrap()),
        Some(TOKEN),
        json!({ "name": "焼きプリン" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "焼きプリン");

    let (status, _) = write_json(
        &app,
        "PUT",
        &format!("/admin/categories/{}", Uuid::new_v4()),
        Some(TOKEN),
        json!({ "name": "喫茶店" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, categories): (_, Vec<Value>) = get_json(&app, "/categories").await;
    let names: Vec<&str> = categories
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["カフェ", "焼きプリン"]);
}

#[tokio::test]
async fn test_delete_category_detaches_posts() {
    let (app, _db) = setup_app().await;
    let pudding = create_category(&app, "プリン").await;
    let cafe = create_category(&app, "カフェ").await;
    let post = create_post(&app, "絶品プリン", &[&pudding, &cafe]).await;
    let id = post["id"].as_str().unwrap();

    let (status, body) = delete(
        &app,
        &format!("/admin/categories/{}", pudding["id"].as_str().unwrap()),
        Some(TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("プリン"));

    let (status, detail): (_, Value) = get_json(&app, &format!("/posts/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(category_names(&detail), vec!["カフェ"]);

    let (status, _) = delete(
        &app,
        &format!("/admin/categories/{}", pudding["id"].as_str().unwrap()),
        Some(TOKEN),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_prefix_serves_same_routes() {
    let (app, _db) = setup_app().await;

    let (status, created) = write_json(
        &app,
        "POST",
        "/api/admin/categories",
        Some(TOKEN),
        json!({ "name": "プリン" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, categories): (_, Vec<Value>) = get_json(&app, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories, vec![created]);
}

#[tokio::test]
async fn test_cover_upload_is_content_addressed() {
    let (app, _db) = setup_app().await;
    let png: Vec<u8> = [&b"\x89PNG\r\n\x1a\n"[..], b"pudding pixels"].concat();
    let boundary = "pudding-boundary";

    let upload = |data: Vec<u8>, content_type: &'static str, token: Option<&'static str>| {
        let mut builder = Request::post("/admin/covers").header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
            .body(Body::from(multipart_file(boundary, content_type, &data)))
            .unwrap()
    };

    let (status, body) = send(&app, upload(png.clone(), "image/png", Some(TOKEN))).await;
    assert_eq!(status, StatusCode::CREATED);
    let first: Value = serde_json::from_slice(&body).unwrap();
    let key = first["key"].as_str().unwrap().to_string();
    assert_eq!(key, blake3::hash(&png).to_hex().to_string());
    assert_eq!(first["url"], format!("{}{}", COVER_BASE, key));

    let (_, body) = send(&app, upload(png.clone(), "image/png", Some(TOKEN))).await;
    let second: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(second["key"], first["key"]);

    let response = tower::ServiceExt::oneshot(
        app.clone(),
        Request::get(format!("/covers/{}", key))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let served = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(served.to_vec(), png);

    let (status, _) = send(&app, upload(b"plain".to_vec(), "text/plain", Some(TOKEN))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, upload(png, "image/png", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_cover_is_404() {
    let (app, _db) = setup_app().await;

    let (status, _) = send(
        &app,
        Request::get(format!("/covers/{}", COVER_KEY))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Request::get("/covers/not-a-key").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_status_routes() {
    let (app, _db) = setup_app().await;

    let (status, body): (_, Value) = get_json(&app, "/_status/livez").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _): (_, Value) = get_json(&app, "/_status/readyz").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body): (_, Value) = get_json(&app, "/_status/version").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_readyz_fails_when_database_closed() {
    let (app, db) = setup_app().await;
    db.close().await;

    let (status, _) = send(
        &app,
        Request::get("/_status/readyz").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unknown_route_answers_in_requested_format() {
    let (app, _db) = setup_app().await;

    let (status, body): (_, Value) = get_json(&app, "/api/nothing-here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "not found" }));
}

#[tokio::test]
async fn test_malformed_ids_answer_with_json_errors() {
    let (app, _db) = setup_app().await;

    let (status, body): (_, Value) = get_json(&app, "/posts/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid request"));

    let (status, body): (_, Value) = get_json(&app, "/posts?category=bad").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid query"));

    let (status, body) = write_json(
        &app,
        "PUT",
        "/admin/posts/not-a-uuid",
        Some(TOKEN),
        post_body("絶品プリン", &[]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = delete(&app, "/admin/posts/not-a-uuid", Some(TOKEN)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = delete(&app, "/admin/posts", Some(TOKEN)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("id"));

    let (status, body) = write_json(
        &app,
        "PUT",
        "/admin/categories/xyz",
        Some(TOKEN),
        json!({ "name": "プリン" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = delete(&app, "/admin/categories/xyz", Some(TOKEN)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // a malformed id still needs a token first
    let (status, _) = delete(&app, "/admin/categories/xyz", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
