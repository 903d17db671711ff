use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::core::security::ActorRole;
use crate::test_support;

#[tokio::test]
async fn distribution_set_then_get_round_trips() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::instructor_token(ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            "/api/v1/subjects/algebra-101/distribution",
            Some(&token),
            Some(json!({
                "midterm": 25.0,
                "final": 35.0,
                "homework": 10.0,
                "labs": 10.0,
                "quizzes": 5.0,
                "participation": 5.0,
                "attendance": 10.0
            })),
        ))
        .await
        .expect("set distribution");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["midterm"], 25.0);
    assert!(body["updated_at"].is_string());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/subjects/algebra-101/distribution",
            Some(&token),
            None,
        ))
        .await
        .expect("get distribution");

    let body = test_support::read_json(response).await;
    assert_eq!(body["midterm"], 25.0);
    assert_eq!(body["final"], 35.0);
    assert_eq!(body["homework"], 10.0);
}

#[tokio::test]
async fn unknown_subject_gets_documented_defaults() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_token("student-1", ActorRole::Student, ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/subjects/never-configured/distribution",
            Some(&token),
            None,
        ))
        .await
        .expect("get distribution");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["midterm"], 20.0);
    assert_eq!(body["final"], 40.0);
    assert_eq!(body["attendance"], 10.0);
    assert!(body["updated_at"].is_null());
}

#[tokio::test]
async fn invalid_weight_sum_is_rejected_without_persisting() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::instructor_token(ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::PUT,
            "/api/v1/subjects/chemistry-210/distribution",
            Some(&token),
            Some(json!({
                "midterm": 30.0,
                "final": 40.0,
                "homework": 10.0,
                "labs": 10.0,
                "quizzes": 5.0,
                "participation": 5.0,
                "attendance": 10.0
            })),
        ))
        .await
        .expect("set distribution");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "response: {body}");

    // Nothing was written, so reads still fall back to the defaults.
    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/subjects/chemistry-210/distribution",
            Some(&token),
            None,
        ))
        .await
        .expect("get distribution");

    let body = test_support::read_json(response).await;
    assert_eq!(body["midterm"], 20.0);
    assert!(body["updated_at"].is_null());
}

#[tokio::test]
async fn students_cannot_set_distributions() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_token("student-1", ActorRole::Student, ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::PUT,
            "/api/v1/subjects/algebra-101/distribution",
            Some(&token),
            Some(json!({
                "midterm": 20.0,
                "final": 40.0,
                "homework": 5.0,
                "labs": 10.0,
                "quizzes": 5.0,
                "participation": 10.0,
                "attendance": 10.0
            })),
        ))
        .await
        .expect("set distribution as student");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
