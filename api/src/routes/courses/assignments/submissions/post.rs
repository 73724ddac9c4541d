use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::submission::Model as SubmissionModel;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::courses::assignments::submissions::common::{SubmitRequest, SubmitResponse};
use crate::state::AppState;

/// POST /api/courses/{course_id}/assignments/{item_id}/submissions
///
/// Submits or resubmits. A disallowed attachment extension does not void the
/// submission: the row and any valid attachments persist, and the first
/// offending extension is reported as a validation error.
pub async fn submit_assignment(
    State(app_state): State<AppState>,
    Path((_course_id, item_id)): Path<(i64, i64)>,
    Json(req): Json<SubmitRequest>,
) -> Response {
    match SubmissionModel::submit(app_state.db(), item_id, req.student_id, &req.attachments).await {
        Ok(outcome) => {
            if let Some(ext) = outcome.rejected_extension {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<Empty>::error(format!(
                        "File extension {ext} is not allowed for this assignment"
                    ))),
                )
                    .into_response();
            }

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    SubmitResponse {
                        submission_id: outcome.submission.id,
                    },
                    "Submission received successfully",
                )),
            )
                .into_response()
        }
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
