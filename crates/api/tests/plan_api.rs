//! HTTP-level integration tests for the plan status route.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, new_owner};

#[tokio::test]
async fn plan_reports_free_tier_with_full_quota() {
    let (_, token) = new_owner();

    let response = get(build_test_app(), "/api/v1/plan", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let plan = &json["data"];
    assert_eq!(plan["plan"], "Free");
    assert_eq!(plan["expired"], false);
    assert_eq!(plan["percent_remaining"], 100);
    assert_eq!(plan["label"], "30 days left");
    assert_eq!(plan["quota"]["remaining"], 100);
}

#[tokio::test]
async fn plan_requires_token() {
    let response = get(build_test_app(), "/api/v1/plan", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
