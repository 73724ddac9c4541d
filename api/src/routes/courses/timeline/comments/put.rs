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

/// PUT /api/courses/{course_id}/timeline/{item_id}/comments/{comment_id}
pub async fn edit_comment(
    State(app_state): State<AppState>,
    Path((_course_id, _item_id, comment_id)): Path<(i64, i64, i64)>,
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

    match CommentModel::edit(app_state.db(), comment_id, claims.sub, &req.content).await {
        Ok(comment) => (
            StatusCode::OK,
            Json(ApiResponse::success(comment, "Comment updated successfully")),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
