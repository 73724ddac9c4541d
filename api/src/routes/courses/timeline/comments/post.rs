use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::comment::Model as CommentModel;
use validator::Validate;

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::courses::timeline::comments::common::CommentRequest;
use crate::state::AppState;
use common::format_validation_errors;

/// POST /api/courses/{course_id}/timeline/{item_id}/comments
pub async fn create_comment(
    State(app_state): State<AppState>,
    Path((_course_id, item_id)): Path<(i64, i64)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<CommentRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&errors))),
        )
            .into_response();
    }

    match CommentModel::add(app_state.db(), item_id, claims.sub, &req.content).await {
        Ok(comment) => (
            StatusCode::OK,
            Json(ApiResponse::success(comment, "Comment added successfully")),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
