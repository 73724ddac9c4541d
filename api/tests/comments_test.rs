mod helpers;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
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

async fn create_post(app: &Router, course_id: i64, token: &str) -> i64 {
    let uri = format!("/api/courses/{course_id}/posts");
    let (status, json) = send(
        app,
        "POST",
        &uri,
        token,
        Some(json!({ "title": "Discussion", "body": "Questions welcome" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create post failed: {json}");
    json["data"]["item_id"].as_i64().unwrap()
}

#[tokio::test]
async fn comment_lifecycle() {
    let (app, app_state) = make_test_app().await;
    let (course_id, instructor_id, student_id) =
        seed_course_with_members(app_state.db()).await.unwrap();
    let (instructor_token, _) = generate_jwt(instructor_id, false);
    let (student_token, _) = generate_jwt(student_id, false);

    let item_id = create_post(&app, course_id, &instructor_token).await;
    let comments_uri = format!("/api/courses/{course_id}/timeline/{item_id}/comments");

    // Student comments on the instructor's post.
    let (status, json) = send(
        &app,
        "POST",
        &comments_uri,
        &student_token,
        Some(json!({ "content": "When is this due?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let comment_id = json["data"]["id"].as_i64().unwrap();

    // Listing includes the author's name.
    let (status, json) = send(&app, "GET", &comments_uri, &instructor_token, None).await;
    assert_eq!(status, StatusCode::OK);
    let comments = json["data"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], "When is this due?");
    assert_eq!(comments[0]["author"]["id"].as_i64().unwrap(), student_id);

    // Only the comment's author may edit it.
    let comment_uri = format!("{comments_uri}/{comment_id}");
    let (status, _) = send(
        &app,
        "PUT",
        &comment_uri,
        &instructor_token,
        Some(json!({ "content": "hijacked" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = send(
        &app,
        "PUT",
        &comment_uri,
        &student_token,
        Some(json!({ "content": "When is this due? (edited)" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["content"], "When is this due? (edited)");

    // The item's author may moderate: delete the student's comment.
    let (status, _) = send(&app, "DELETE", &comment_uri, &instructor_token, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "GET", &comments_uri, &student_token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn commenting_on_a_deleted_item_is_not_found() {
    let (app, app_state) = make_test_app().await;
    let (course_id, instructor_id, student_id) =
        seed_course_with_members(app_state.db()).await.unwrap();
    let (instructor_token, _) = generate_jwt(instructor_id, false);
    let (student_token, _) = generate_jwt(student_id, false);

    let item_id = create_post(&app, course_id, &instructor_token).await;

    let post_uri = format!("/api/courses/{course_id}/posts/{item_id}");
    let (status, _) = send(&app, "DELETE", &post_uri, &instructor_token, None).await;
    assert_eq!(status, StatusCode::OK);

    let comments_uri = format!("/api/courses/{course_id}/timeline/{item_id}/comments");
    let (status, json) = send(
        &app,
        "POST",
        &comments_uri,
        &student_token,
        Some(json!({ "content": "too late" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error_code"], "none");
}
