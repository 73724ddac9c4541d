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
use crate::routes::courses::common::CreatedItemResponse;
use crate::state::AppState;
use common::format_validation_errors;

/// POST /api/courses/{course_id}/assignments
pub async fn create_assignment(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(req): Json<AssignmentRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&errors))),
        )
            .into_response();
    }

    let allowed_extensions = req.allowed_extensions.unwrap_or_default();
    let attachments = req.attachments.unwrap_or_default();

    match TimelineItemModel::create_assignment(
        app_state.db(),
        course_id,
        req.instructor_id,
        &req.title,
        &req.body,
        req.deadline,
        &allowed_extensions,
        &attachments,
    )
    .await
    {
        Ok(item) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CreatedItemResponse { item_id: item.id },
                "Assignment created successfully",
            )),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
