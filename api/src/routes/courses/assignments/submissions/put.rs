use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::submission::Model as SubmissionModel;
use validator::Validate;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::courses::assignments::submissions::common::GradeRequest;
use crate::state::AppState;
use common::format_validation_errors;

/// PUT /api/courses/{course_id}/assignments/{item_id}/submissions/{submission_id}/grade
///
/// The route guard checks the instructor role against the path's course; the
/// domain layer re-checks membership against the course the submission
/// actually belongs to.
pub async fn grade_submission(
    State(app_state): State<AppState>,
    Path((_course_id, _item_id, submission_id)): Path<(i64, i64, i64)>,
    Json(req): Json<GradeRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&errors))),
        )
            .into_response();
    }

    match SubmissionModel::grade(
        app_state.db(),
        submission_id,
        req.instructor_id,
        req.grade,
        req.feedback,
    )
    .await
    {
        Ok(submission) => {
            let message = format!("Submission {} graded successfully", submission.id);
            (
                StatusCode::OK,
                Json(ApiResponse::success(submission, message)),
            )
                .into_response()
        }
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
