use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::submission::Model as SubmissionModel;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::courses::assignments::submissions::common::{
    StudentAssignmentStatusResponse, SubmissionResponse,
};
use crate::state::AppState;

/// GET /api/courses/{course_id}/assignments/{item_id}/submissions
///
/// Instructor view: every live submission for the assignment, with student
/// identity and attachments.
pub async fn get_assignment_submissions(
    State(app_state): State<AppState>,
    Path((_course_id, item_id)): Path<(i64, i64)>,
) -> Response {
    match SubmissionModel::list_for_assignment(app_state.db(), item_id).await {
        Ok(rows) => {
            let data: Vec<SubmissionResponse> = rows
                .into_iter()
                .map(|(submission, student, attachments)| {
                    SubmissionResponse::from_parts(submission, student, attachments)
                })
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Submissions retrieved successfully")),
            )
                .into_response()
        }
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}

/// GET /api/courses/{course_id}/students/{student_id}/submissions
///
/// Student progress view: one entry per active assignment, whether or not a
/// submission exists yet.
pub async fn get_student_course_submissions(
    State(app_state): State<AppState>,
    Path((course_id, student_id)): Path<(i64, i64)>,
) -> Response {
    match SubmissionModel::student_course_overview(app_state.db(), course_id, student_id).await {
        Ok(rows) => {
            let data: Vec<StudentAssignmentStatusResponse> =
                rows.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    data,
                    "Student submissions retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
