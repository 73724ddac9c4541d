mod helpers;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use helpers::make_test_app;
use serde_json::{Value, json};
use tower::ServiceExt;

use api::auth::generate_jwt;
use db::test_utils::seed_course_with_members;

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    if body.is_some() {
        builder = builder.header("Content-Type", "application/json");
    }
    let req = builder
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .unwrap();

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn timeline_requires_authentication() {
    let (app, app_state) = make_test_app().await;
    let (course_id, _, _) = seed_course_with_members(app_state.db()).await.unwrap();

    let uri = format!("/api/courses/{course_id}/timeline");
    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn feed_composes_posts_and_assignments_newest_first() {
    let (app, app_state) = make_test_app().await;
    let (course_id, instructor_id, student_id) =
        seed_course_with_members(app_state.db()).await.unwrap();
    let (instructor_token, _) = generate_jwt(instructor_id, false);
    let (student_token, _) = generate_jwt(student_id, false);

    let posts_uri = format!("/api/courses/{course_id}/posts");
    let (status, _) = send(
        &app,
        "POST",
        &posts_uri,
        Some(&instructor_token),
        Some(json!({ "title": "Welcome", "body": "Hello everyone", "attachments": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let assignments_uri = format!("/api/courses/{course_id}/assignments");
    let deadline = (Utc::now() + Duration::days(7)).to_rfc3339();
    let (status, _) = send(
        &app,
        "POST",
        &assignments_uri,
        Some(&instructor_token),
        Some(json!({
            "instructor_id": instructor_id,
            "title": "Practical 1",
            "body": "Implement a parser",
            "deadline": deadline,
            "allowed_extensions": ["PDF", ".pdf"],
            "attachments": [{
                "file_name": "brief.pdf",
                "file_path": "/store/brief.pdf",
                "file_type": "application/pdf",
                "file_size": 4096
            }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let timeline_uri = format!("/api/courses/{course_id}/timeline");
    let (status, json) = send(&app, "GET", &timeline_uri, Some(&student_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), 2);

    // Newest first: the assignment was created second.
    assert_eq!(entries[0]["kind"], "assignment");
    assert_eq!(entries[0]["allowed_extensions"], json!([".pdf"]));
    assert_eq!(entries[0]["attachments"].as_array().unwrap().len(), 1);
    assert_eq!(entries[1]["kind"], "post");
    assert!(entries[1].get("deadline").is_none());
}

#[tokio::test]
async fn students_cannot_create_posts() {
    let (app, app_state) = make_test_app().await;
    let (course_id, _, student_id) = seed_course_with_members(app_state.db()).await.unwrap();
    let (student_token, _) = generate_jwt(student_id, false);

    let posts_uri = format!("/api/courses/{course_id}/posts");
    let (status, _) = send(
        &app,
        "POST",
        &posts_uri,
        Some(&student_token),
        Some(json!({ "title": "Hi", "body": "I should not be able to" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deleted_post_disappears_from_all_reads() {
    let (app, app_state) = make_test_app().await;
    let (course_id, instructor_id, _) = seed_course_with_members(app_state.db()).await.unwrap();
    let (instructor_token, _) = generate_jwt(instructor_id, false);

    let posts_uri = format!("/api/courses/{course_id}/posts");
    let (status, json) = send(
        &app,
        "POST",
        &posts_uri,
        Some(&instructor_token),
        Some(json!({ "title": "Ephemeral", "body": "Soon gone" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let item_id = json["data"]["item_id"].as_i64().unwrap();

    let item_uri = format!("/api/courses/{course_id}/posts/{item_id}");
    let (status, _) = send(&app, "DELETE", &item_uri, Some(&instructor_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "GET", &item_uri, Some(&instructor_token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_code"], "none");

    let timeline_uri = format!("/api/courses/{course_id}/timeline");
    let (status, json) = send(&app, "GET", &timeline_uri, Some(&instructor_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn validation_errors_reject_blank_titles() {
    let (app, app_state) = make_test_app().await;
    let (course_id, instructor_id, _) = seed_course_with_members(app_state.db()).await.unwrap();
    let (instructor_token, _) = generate_jwt(instructor_id, false);

    let posts_uri = format!("/api/courses/{course_id}/posts");
    let (status, json) = send(
        &app,
        "POST",
        &posts_uri,
        Some(&instructor_token),
        Some(json!({ "title": "", "body": "Body" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error_code"], "none");
}
