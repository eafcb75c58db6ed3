//! HTTP-level integration tests for the connected-channel routes.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with, delete, get, new_owner, post_json};
use replydesk_core::store::ChannelStore;
use replydesk_db::store::MemoryStore;
use serde_json::{json, Value};

async fn connect(app: axum::Router, token: &str, kind: &str, name: &str) -> Value {
    let response = post_json(
        app,
        "/api/v1/channels",
        Some(token),
        json!({ "type": kind, "name": name, "token": "EAAB-page-access-token-4321" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

fn names(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn list_without_token_is_401() {
    let response = get(build_test_app(), "/api/v1/channels", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn created_channel_token_is_masked() {
    let store = MemoryStore::new();
    let app = build_test_app_with(store.clone());
    let (owner, token) = new_owner();

    let created = connect(app.clone(), &token, "facebook", "Acme FB Page").await;
    assert_eq!(created["type"], "facebook");
    let masked = created["token"].as_str().unwrap();
    assert_eq!(masked, format!("{}4321", "•".repeat(26)));

    let listed = body_json(get(app, "/api/v1/channels", Some(&token)).await).await;
    assert_eq!(listed["data"][0]["token"], masked);

    // Stored in clear for outbound use.
    let stored = store.list_channels(owner).await.unwrap();
    assert_eq!(stored[0].api_token.expose(), "EAAB-page-access-token-4321");
}

#[tokio::test]
async fn search_filters_by_name_or_type_ignoring_case() {
    let app = build_test_app();
    let (_, token) = new_owner();
    connect(app.clone(), &token, "facebook", "Acme FB Page").await;
    connect(app.clone(), &token, "instagram", "Acme IG").await;
    connect(app.clone(), &token, "instagram", "Outlet Store").await;

    let by_type = get(app.clone(), "/api/v1/channels?search=INSTA", Some(&token)).await;
    assert_eq!(by_type.status(), StatusCode::OK);
    assert_eq!(names(&body_json(by_type).await), vec!["Acme IG", "Outlet Store"]);

    let by_name = get(app.clone(), "/api/v1/channels?search=acme", Some(&token)).await;
    assert_eq!(names(&body_json(by_name).await), vec!["Acme FB Page", "Acme IG"]);

    let none = get(app.clone(), "/api/v1/channels?search=tiktok", Some(&token)).await;
    assert!(names(&body_json(none).await).is_empty());

    let all = get(app, "/api/v1/channels?search=", Some(&token)).await;
    assert_eq!(names(&body_json(all).await).len(), 3);
}

#[tokio::test]
async fn blank_name_is_400() {
    let (_, token) = new_owner();

    let response = post_json(
        build_test_app(),
        "/api/v1/channels",
        Some(&token),
        json!({ "type": "instagram", "name": "  ", "token": "abc" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_type_is_rejected() {
    let (_, token) = new_owner();

    let response = post_json(
        build_test_app(),
        "/api/v1/channels",
        Some(&token),
        json!({ "type": "tiktok", "name": "Acme", "token": "abc" }),
    )
    .await;

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn delete_is_owner_scoped() {
    let app = build_test_app();
    let (_, alice) = new_owner();
    let (_, bob) = new_owner();
    let channel = connect(app.clone(), &alice, "instagram", "Acme IG").await;
    let uri = format!("/api/v1/channels/{}", channel["id"]);

    let foreign = delete(app.clone(), &uri, Some(&bob)).await;
    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(foreign).await["code"], "NOT_FOUND");

    let own = delete(app.clone(), &uri, Some(&alice)).await;
    assert_eq!(own.status(), StatusCode::NO_CONTENT);

    let listed = body_json(get(app.clone(), "/api/v1/channels", Some(&alice)).await).await;
    assert!(names(&listed).is_empty());

    let again = delete(app, &uri, Some(&alice)).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
