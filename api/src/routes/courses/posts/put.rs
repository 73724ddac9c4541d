use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::timeline_item::Model as TimelineItemModel;
use validator::Validate;

use crate::auth::AuthUser;
use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::courses::posts::common::PostRequest;
use crate::state::AppState;
use common::format_validation_errors;

/// PUT /api/courses/{course_id}/posts/{item_id}
pub async fn edit_post(
    State(app_state): State<AppState>,
    Path((_course_id, item_id)): Path<(i64, i64)>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<PostRequest>,
) -> Response {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Empty>::error(format_validation_errors(&errors))),
        )
            .into_response();
    }

    match TimelineItemModel::edit_post(
        app_state.db(),
        item_id,
        claims.sub,
        &req.title,
        &req.body,
        req.attachments.as_deref(),
    )
    .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Post updated successfully")),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
