use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::comment::Model as CommentModel;

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::state::AppState;

/// DELETE /api/courses/{course_id}/timeline/{item_id}/comments/{comment_id}
///
/// Allowed for the comment's author and for the author of the item it hangs
/// under.
pub async fn delete_comment(
    State(app_state): State<AppState>,
    Path((_course_id, _item_id, comment_id)): Path<(i64, i64, i64)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    match CommentModel::delete(app_state.db(), comment_id, claims.sub).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Comment deleted successfully")),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
