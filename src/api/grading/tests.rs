use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::core::security::ActorRole;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::test_support;

#[tokio::test]
async fn submitted_marks_resolve_and_persist() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::instructor_token(ctx.state.settings());
    test_support::insert_subject(ctx.state.db(), "algebra-101", "program-math", 30).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/grading/marks",
            Some(&token),
            Some(json!({
                "student_id": "student-1",
                "subject_id": "algebra-101",
                "class_id": "class-9a",
                "marks": {
                    "midterm": 80.0,
                    "final": 90.0,
                    "homework": 100.0,
                    "labs": 70.0,
                    "quizzes": 60.0,
                    "participation": 100.0,
                    "attendance": 100.0
                }
            })),
        ))
        .await
        .expect("submit marks");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::OK, "response: {body}");
    assert_eq!(body["total_score"], 87.0);
    assert_eq!(body["letter_grade"], "B+");
    assert_eq!(body["points"], 3.5);
    assert_eq!(body["is_retake"], false);
    assert_eq!(body["auto_failed"], false);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/grading/marks/class-9a/student-1",
            Some(&token),
            None,
        ))
        .await
        .expect("read marks");

    let body = test_support::read_json(response).await;
    let record = &body["marks"]["algebra-101"];
    assert_eq!(record["total_score"], 87.0);
    assert_eq!(record["letter_grade"], "B+");
    assert_eq!(record["graded_by"], "instructor-1");
}

#[tokio::test]
async fn retake_enrollment_caps_the_letter_grade() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::instructor_token(ctx.state.settings());
    test_support::insert_subject(ctx.state.db(), "algebra-101", "program-math", 30).await;
    test_support::insert_enrollment(ctx.state.db(), "student-2", "class-9a", &["algebra-101"])
        .await;

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/grading/marks",
            Some(&token),
            Some(json!({
                "student_id": "student-2",
                "subject_id": "algebra-101",
                "class_id": "class-9a",
                "marks": {
                    "midterm": 95.0,
                    "final": 95.0,
                    "homework": 95.0,
                    "labs": 95.0,
                    "quizzes": 95.0,
                    "participation": 95.0,
                    "attendance": 95.0
                }
            })),
        ))
        .await
        .expect("submit marks");

    let body = test_support::read_json(response).await;
    assert_eq!(body["total_score"], 95.0);
    assert_eq!(body["letter_grade"], "B+");
    assert_eq!(body["points"], 3.5);
    assert_eq!(body["is_retake"], true);
}

#[tokio::test]
async fn absence_limit_overrides_earned_score() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::instructor_token(ctx.state.settings());
    test_support::insert_subject(ctx.state.db(), "physics-110", "program-science", 10).await;

    let now = primitive_now_utc();
    for index in 0..3 {
        repositories::absence_events::create(
            ctx.state.db(),
            repositories::absence_events::CreateAbsenceEvent {
                id: &format!("absence-{index}"),
                student_id: "student-3",
                subject_id: "physics-110",
                class_id: Some("class-9a"),
                kind: crate::db::types::AbsenceKind::WithoutExcuse,
                recorded_by: "instructor-1",
                created_at: now,
            },
        )
        .await
        .expect("insert absence");
    }

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/grading/marks",
            Some(&token),
            Some(json!({
                "student_id": "student-3",
                "subject_id": "physics-110",
                "class_id": "class-9a",
                "marks": {
                    "midterm": 90.0,
                    "final": 90.0,
                    "homework": 90.0,
                    "labs": 90.0,
                    "quizzes": 90.0,
                    "participation": 90.0,
                    "attendance": 90.0
                }
            })),
        ))
        .await
        .expect("submit marks");

    // 3 of 10 sessions missed is 30%, over the 20% limit.
    let body = test_support::read_json(response).await;
    assert_eq!(body["auto_failed"], true);
    assert_eq!(body["letter_grade"], "FA");
    assert_eq!(body["points"], 0.0);
    assert_eq!(body["total_score"], 90.0);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/grading/marks/class-9a/student-3",
            Some(&token),
            None,
        ))
        .await
        .expect("read marks");

    let body = test_support::read_json(response).await;
    assert_eq!(body["marks"]["physics-110"]["letter_grade"], "FA");
}

#[tokio::test]
async fn sibling_subjects_merge_into_one_enrollment() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::instructor_token(ctx.state.settings());
    test_support::insert_subject(ctx.state.db(), "algebra-101", "program-math", 30).await;
    test_support::insert_subject(ctx.state.db(), "physics-110", "program-science", 30).await;

    for subject_id in ["algebra-101", "physics-110"] {
        let response = ctx
            .app
            .clone()
            .oneshot(test_support::json_request(
                Method::POST,
                "/api/v1/grading/marks",
                Some(&token),
                Some(json!({
                    "student_id": "student-4",
                    "subject_id": subject_id,
                    "class_id": "class-9b",
                    "marks": { "midterm": 70.0, "final": 70.0 }
                })),
            ))
            .await
            .expect("submit marks");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/grading/marks/class-9b/student-4",
            Some(&token),
            None,
        ))
        .await
        .expect("read marks");

    // Both subject sub-objects survive in the shared record.
    let body = test_support::read_json(response).await;
    assert!(body["marks"]["algebra-101"].is_object(), "response: {body}");
    assert!(body["marks"]["physics-110"].is_object(), "response: {body}");
}

#[tokio::test]
async fn regrade_overwrites_but_keeps_created_at() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::instructor_token(ctx.state.settings());
    test_support::insert_subject(ctx.state.db(), "algebra-101", "program-math", 30).await;

    let submit = |marks: serde_json::Value| {
        test_support::json_request(
            Method::POST,
            "/api/v1/grading/marks",
            Some(&token),
            Some(json!({
                "student_id": "student-5",
                "subject_id": "algebra-101",
                "class_id": "class-9a",
                "marks": marks
            })),
        )
    };

    ctx.app.clone().oneshot(submit(json!({ "midterm": 50.0 }))).await.expect("first submit");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/grading/marks/class-9a/student-5",
            Some(&token),
            None,
        ))
        .await
        .expect("read marks");
    let first = test_support::read_json(response).await;
    let created_at = first["marks"]["algebra-101"]["created_at"].as_str().unwrap().to_string();

    ctx.app.clone().oneshot(submit(json!({ "midterm": 90.0, "final": 90.0 }))).await.expect("regrade");

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/grading/marks/class-9a/student-5",
            Some(&token),
            None,
        ))
        .await
        .expect("read marks");
    let second = test_support::read_json(response).await;
    let record = &second["marks"]["algebra-101"];

    assert_eq!(record["created_at"], created_at.as_str());
    assert_eq!(record["midterm"], 90.0);
}

#[tokio::test]
async fn blank_identifiers_are_rejected_before_persistence() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::instructor_token(ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/grading/marks",
            Some(&token),
            Some(json!({
                "student_id": "student-1",
                "subject_id": "   ",
                "class_id": "class-9a",
                "marks": {}
            })),
        ))
        .await
        .expect("submit marks");

    let status = response.status();
    let body = test_support::read_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "response: {body}");
}

#[tokio::test]
async fn students_cannot_submit_marks() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_token("student-1", ActorRole::Student, ctx.state.settings());

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/grading/marks",
            Some(&token),
            Some(json!({
                "student_id": "student-1",
                "subject_id": "algebra-101",
                "class_id": "class-9a",
                "marks": {}
            })),
        ))
        .await
        .expect("submit marks as student");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn students_read_only_their_own_marks() {
    let ctx = test_support::setup_test_context().await;
    let student = test_support::bearer_token("student-6", ActorRole::Student, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/grading/marks/class-9a/student-7",
            Some(&student),
            None,
        ))
        .await
        .expect("read marks of another student");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/grading/marks/class-9a/student-6",
            Some(&student),
            None,
        ))
        .await
        .expect("read own marks");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn scale_tables_are_exposed_per_variant() {
    let ctx = test_support::setup_test_context().await;
    let token = test_support::bearer_token("student-1", ActorRole::Student, ctx.state.settings());

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/grading/scales/standard",
            Some(&token),
            None,
        ))
        .await
        .expect("standard scale");
    let standard = test_support::read_json(response).await;
    assert_eq!(standard[0]["grade"], "A");
    assert_eq!(standard[0]["points"], 4.0);

    let response = ctx
        .app
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/grading/scales/retake",
            Some(&token),
            None,
        ))
        .await
        .expect("retake scale");
    let retake = test_support::read_json(response).await;
    assert_eq!(retake[0]["grade"], "B+");
    assert_eq!(retake[0]["max_score"], 100.0);
    assert!(retake
        .as_array()
        .unwrap()
        .iter()
        .all(|rule| rule["grade"] != "A"));
}
