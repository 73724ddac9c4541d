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
use crate::routes::courses::common::CreatedItemResponse;
use crate::routes::courses::posts::common::PostRequest;
use crate::state::AppState;
use common::format_validation_errors;

/// POST /api/courses/{course_id}/posts
pub async fn create_post(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
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

    let attachments = req.attachments.unwrap_or_default();

    match TimelineItemModel::create_post(
        app_state.db(),
        course_id,
        claims.sub,
        &req.title,
        &req.body,
        &attachments,
    )
    .await
    {
        Ok(item) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CreatedItemResponse { item_id: item.id },
                "Post created successfully",
            )),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
