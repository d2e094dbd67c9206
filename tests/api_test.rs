//! HTTP-level tests: the router must relay data-access status codes and
//! messages unchanged.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use image_arena_api::{AppState, Config, DbAccess, router::build_router, store::MemoryStore};

fn test_app() -> Router {
    let config = Config {
        environment: "test".to_string(),
        port: 0,
        request_timeout: 5,
        store_namespace: "api_test".to_string(),
    };
    let db = DbAccess::new(Arc::new(MemoryStore::new("api_test")));
    build_router(AppState { db, config })
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request build failed")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request build failed")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body read failed")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

#[tokio::test]
async fn health_reports_healthy() {
    let app = test_app();
    let response = app.oneshot(get("/health")).await.expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn create_user_returns_201() {
    let app = test_app();
    let response = app
        .oneshot(post_json(
            "/create_user",
            json!({
                "username": "test_user",
                "password": "test_password",
                "email": "test@example.com"
            }),
        ))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User created.");
}

#[tokio::test]
async fn create_user_rejects_malformed_payload() {
    let app = test_app();
    let response = app
        .oneshot(post_json("/create_user", json!({ "username": "only" })))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn check_user_available_returns_200() {
    let app = test_app();
    let response = app
        .oneshot(post_json(
            "/check_user",
            json!({ "username": "", "email": "" }),
        ))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn check_user_relays_conflict() {
    let app = test_app();
    let created = app
        .clone()
        .oneshot(post_json(
            "/create_user",
            json!({
                "username": "casey",
                "password": "test_password",
                "email": "casey@example.com"
            }),
        ))
        .await
        .expect("request failed");
    assert_eq!(created.status(), StatusCode::CREATED);

    let response = app
        .oneshot(post_json("/check_user", json!({ "username": "casey" })))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert!(
        body["message"]
            .as_str()
            .expect("message missing")
            .contains("Username")
    );
}

#[tokio::test]
async fn get_user_found_over_http() {
    let app = test_app();
    app.clone()
        .oneshot(post_json(
            "/create_user",
            json!({
                "username": "casey",
                "password": "test_password",
                "email": "casey@example.com"
            }),
        ))
        .await
        .expect("request failed");

    let response = app
        .oneshot(get("/get_user?username=casey"))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "User found.");
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn create_image_requires_existing_creator() {
    let app = test_app();
    let response = app
        .oneshot(post_json(
            "/create_image",
            json!({
                "creator": "missing-user",
                "prompt": "test_prompt",
                "url": "test_url",
                "elo": 1000
            }),
        ))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Creator user does not exist.");
}

#[tokio::test]
async fn get_random_image_on_empty_store_returns_404() {
    let app = test_app();
    let response = app
        .oneshot(get("/get_random_image"))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn vote_flow_updates_ratings() {
    let app = test_app();

    let created = app
        .clone()
        .oneshot(post_json(
            "/create_user",
            json!({
                "username": "casey",
                "password": "test_password",
                "email": "casey@example.com"
            }),
        ))
        .await
        .expect("request failed");
    let creator = body_json(created).await["data"]["id"]
        .as_str()
        .expect("id missing")
        .to_string();

    let mut image_ids = Vec::new();
    for prompt in ["a fox in watercolor", "a crow in charcoal"] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/create_image",
                json!({
                    "creator": creator.as_str(),
                    "prompt": prompt,
                    "url": format!("https://images.example.com/{}.png", prompt.len()),
                    "elo": 1000
                }),
            ))
            .await
            .expect("request failed");
        assert_eq!(response.status(), StatusCode::CREATED);
        image_ids.push(
            body_json(response).await["data"]["id"]
                .as_str()
                .expect("id missing")
                .to_string(),
        );
    }

    let portfolio = app
        .clone()
        .oneshot(get(&format!("/get_images?creator={}", creator)))
        .await
        .expect("request failed");
    assert_eq!(portfolio.status(), StatusCode::OK);
    assert_eq!(
        body_json(portfolio).await["data"]
            .as_array()
            .expect("data not an array")
            .len(),
        2
    );

    let vote = app
        .clone()
        .oneshot(post_json(
            "/update_image_elo",
            json!({
                "imageIdOne": image_ids[0],
                "newEloOne": 1016,
                "imageIdTwo": image_ids[1],
                "newEloTwo": 984
            }),
        ))
        .await
        .expect("request failed");
    assert_eq!(vote.status(), StatusCode::OK);

    let fetched = app
        .oneshot(get(&format!("/get_images?id={}", image_ids[0])))
        .await
        .expect("request failed");
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await["data"]["elo"], 1016);
}

#[tokio::test]
async fn unknown_route_returns_structured_404() {
    let app = test_app();
    let response = app
        .oneshot(get("/no_such_route"))
        .await
        .expect("request failed");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
}
