use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::course_role::{Model as CourseRoleModel, Role};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// Extracts and validates the user from request headers, then re-inserts it
/// into the request extensions for downstream handlers.
async fn extract_and_insert_authuser(
    mut req: Request<Body>,
) -> Result<(Request<Body>, AuthUser), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user.clone());
    Ok((req, user))
}

async fn user_has_role(
    db: &DatabaseConnection,
    course_id: i64,
    user_id: i64,
    role: Role,
) -> bool {
    match CourseRoleModel::has_role(db, course_id, user_id, role).await {
        Ok(held) => held,
        Err(e) => {
            // Deny on DB error (fail-safe).
            tracing::warn!(
                error = %e,
                user_id, course_id,
                "DB error while checking role; denying access"
            );
            false
        }
    }
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _user) = extract_and_insert_authuser(req).await?;

    Ok(next.run(req).await)
}

/// Base role guard: requires the authenticated user to hold `role` in the
/// course named by the `course_id` path parameter. Admins bypass.
async fn allow_role_base(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
    role: Role,
    failure_msg: &str,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let db = app_state.db();

    let (req, user) = extract_and_insert_authuser(req).await?;

    let course_id = params
        .get("course_id")
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Missing or invalid course_id")),
        ))?;

    if user.0.admin {
        return Ok(next.run(req).await);
    }

    if user_has_role(db, course_id, user.0.sub, role).await {
        Ok(next.run(req).await)
    } else {
        Err((StatusCode::FORBIDDEN, Json(ApiResponse::error(failure_msg))))
    }
}

/// Guard for instructor-only routes within a course.
pub async fn allow_instructor(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_role_base(
        State(app_state),
        Path(params),
        req,
        next,
        Role::Instructor,
        "Instructor access required for this course",
    )
    .await
}

/// Guard for student-only routes within a course.
pub async fn allow_student(
    State(app_state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_role_base(
        State(app_state),
        Path(params),
        req,
        next,
        Role::Student,
        "Student enrollment required for this course",
    )
    .await
}
