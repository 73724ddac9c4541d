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
    token: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"));
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
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn create_assignment(
    app: &Router,
    course_id: i64,
    instructor_id: i64,
    token: &str,
    deadline_offset_hours: i64,
    extensions: Value,
) -> i64 {
    let deadline = (Utc::now() + Duration::hours(deadline_offset_hours)).to_rfc3339();
    let body = json!({
        "instructor_id": instructor_id,
        "title": "Essay",
        "body": "Write about ownership",
        "deadline": deadline,
        "allowed_extensions": extensions,
        "attachments": []
    });

    let uri = format!("/api/courses/{course_id}/assignments");
    let (status, json) = send(app, "POST", &uri, token, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create assignment failed: {json}");
    json["data"]["item_id"].as_i64().unwrap()
}

fn attachment(name: &str) -> Value {
    json!({
        "file_name": name,
        "file_path": format!("/store/{name}"),
        "file_type": "application/octet-stream",
        "file_size": 1024
    })
}

#[tokio::test]
async fn full_submission_and_grading_flow() {
    let (app, app_state) = make_test_app().await;
    let (course_id, instructor_id, student_id) =
        seed_course_with_members(app_state.db()).await.unwrap();
    let (instructor_token, _) = generate_jwt(instructor_id, false);
    let (student_token, _) = generate_jwt(student_id, false);

    let item_id = create_assignment(
        &app,
        course_id,
        instructor_id,
        &instructor_token,
        1,
        json!(["pdf"]),
    )
    .await;

    let submit_uri = format!("/api/courses/{course_id}/assignments/{item_id}/submissions");

    // A .docx attachment is rejected, naming the extension.
    let (status, json) = send(
        &app,
        "POST",
        &submit_uri,
        &student_token,
        Some(json!({ "student_id": student_id, "attachments": [attachment("essay.docx")] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error_code"], "none");
    assert!(json["message"].as_str().unwrap().contains(".docx"));

    // A .pdf attachment is accepted.
    let (status, json) = send(
        &app,
        "POST",
        &submit_uri,
        &student_token,
        Some(json!({ "student_id": student_id, "attachments": [attachment("essay.pdf")] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "submit failed: {json}");
    let submission_id = json["data"]["submission_id"].as_i64().unwrap();

    // Resubmitting returns the same submission id, not a new row.
    let (status, json) = send(
        &app,
        "POST",
        &submit_uri,
        &student_token,
        Some(json!({ "student_id": student_id, "attachments": [attachment("essay.pdf")] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["submission_id"].as_i64().unwrap(), submission_id);

    // Instructor listing shows exactly one submission.
    let (status, json) = send(&app, "GET", &submit_uri, &instructor_token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Grade it.
    let grade_uri = format!(
        "/api/courses/{course_id}/assignments/{item_id}/submissions/{submission_id}/grade"
    );
    let (status, json) = send(
        &app,
        "PUT",
        &grade_uri,
        &instructor_token,
        Some(json!({ "instructor_id": instructor_id, "grade": 85, "feedback": "Good" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "grade failed: {json}");
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains(&submission_id.to_string())
    );

    // The student's progress view round-trips the grade.
    let overview_uri = format!("/api/courses/{course_id}/students/{student_id}/submissions");
    let (status, json) = send(&app, "GET", &overview_uri, &student_token, None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["submitted"], true);
    assert_eq!(rows[0]["grade"], 85);
    assert_eq!(rows[0]["feedback"], "Good");
}

#[tokio::test]
async fn submitting_past_deadline_fails_and_creates_nothing() {
    let (app, app_state) = make_test_app().await;
    let (course_id, instructor_id, student_id) =
        seed_course_with_members(app_state.db()).await.unwrap();
    let (instructor_token, _) = generate_jwt(instructor_id, false);
    let (student_token, _) = generate_jwt(student_id, false);

    let item_id = create_assignment(
        &app,
        course_id,
        instructor_id,
        &instructor_token,
        -1,
        json!([]),
    )
    .await;

    let submit_uri = format!("/api/courses/{course_id}/assignments/{item_id}/submissions");
    let (status, json) = send(
        &app,
        "POST",
        &submit_uri,
        &student_token,
        Some(json!({ "student_id": student_id, "attachments": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error_code"], "none");
    assert!(json["message"].as_str().unwrap().contains("deadline"));

    let (status, json) = send(&app, "GET", &submit_uri, &instructor_token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn students_cannot_grade_or_list_submissions() {
    let (app, app_state) = make_test_app().await;
    let (course_id, instructor_id, student_id) =
        seed_course_with_members(app_state.db()).await.unwrap();
    let (instructor_token, _) = generate_jwt(instructor_id, false);
    let (student_token, _) = generate_jwt(student_id, false);

    let item_id = create_assignment(
        &app,
        course_id,
        instructor_id,
        &instructor_token,
        1,
        json!([]),
    )
    .await;

    let submit_uri = format!("/api/courses/{course_id}/assignments/{item_id}/submissions");
    let (status, _) = send(&app, "GET", &submit_uri, &student_token, None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let grade_uri =
        format!("/api/courses/{course_id}/assignments/{item_id}/submissions/1/grade");
    let (status, _) = send(
        &app,
        "PUT",
        &grade_uri,
        &student_token,
        Some(json!({ "instructor_id": student_id, "grade": 100, "feedback": null })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
