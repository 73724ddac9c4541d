use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::error::DomainError;
use db::models::timeline_item::{Model as TimelineItemModel, TimelineItemKind};

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::state::AppState;

/// DELETE /api/courses/{course_id}/posts/{item_id}
///
/// Soft-deletes the item and its post payload together.
pub async fn delete_post(
    State(app_state): State<AppState>,
    Path((_course_id, item_id)): Path<(i64, i64)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> Response {
    let db = app_state.db();

    let result: Result<(), DomainError> = async {
        TimelineItemModel::find_active_of_kind(db, item_id, TimelineItemKind::Post)
            .await?
            .ok_or(DomainError::NotFound("post"))?;

        TimelineItemModel::soft_delete(db, item_id, claims.sub).await
    }
    .await;

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Post deleted successfully")),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
