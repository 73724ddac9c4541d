use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::timeline_item::Model as TimelineItemModel;
use validator::Validate;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::courses::assignments::common::AssignmentRequest;
use crate::state::AppState;
use common::format_validation_errors;

/// PUT /api/courses/{course_id}/assignments/{item_id}
pub async fn edit_assignment(
    State(app_state): State<AppState>,
    Path((_course_id, item_id)): Path<(i64, i64)>,
    Json(req): Json<AssignmentRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&errors))),
        )
            .into_response();
    }

    match TimelineItemModel::edit_assignment(
        app_state.db(),
        item_id,
        req.instructor_id,
        &req.title,
        &req.body,
        req.deadline,
        req.allowed_extensions.as_deref(),
        req.attachments.as_deref(),
    )
    .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Assignment updated successfully")),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
