use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::timeline_item;

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::courses::common::TimelineEntryResponse;
use crate::state::AppState;

/// GET /api/courses/{course_id}/timeline
///
/// The course feed: every active item newest first, composed with
/// attachments, comments, and kind-specific detail.
pub async fn get_course_timeline(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Response {
    match timeline_item::course_feed(app_state.db(), course_id).await {
        Ok(entries) => {
            let data: Vec<TimelineEntryResponse> = entries.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Timeline retrieved successfully")),
            )
                .into_response()
        }
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}

/// GET /api/courses/{course_id}/timeline/{item_id}
pub async fn get_timeline_item(
    State(app_state): State<AppState>,
    Path((_course_id, item_id)): Path<(i64, i64)>,
) -> Response {
    match timeline_item::item_detail(app_state.db(), item_id).await {
        Ok(entry) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TimelineEntryResponse::from(entry),
                "Timeline item retrieved successfully",
            )),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
