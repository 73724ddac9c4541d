use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::error::DomainError;
use db::models::timeline_item::{self, TimelineItemKind};

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::courses::common::TimelineEntryResponse;
use crate::state::AppState;

/// GET /api/courses/{course_id}/assignments
pub async fn get_course_assignments(
    State(app_state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Response {
    match timeline_item::course_feed(app_state.db(), course_id).await {
        Ok(entries) => {
            let data: Vec<TimelineEntryResponse> = entries
                .into_iter()
                .filter(|e| e.item.kind == TimelineItemKind::Assignment)
                .map(Into::into)
                .collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Assignments retrieved successfully")),
            )
                .into_response()
        }
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}

/// GET /api/courses/{course_id}/assignments/{item_id}
pub async fn get_assignment(
    State(app_state): State<AppState>,
    Path((_course_id, item_id)): Path<(i64, i64)>,
) -> Response {
    let result = async {
        let entry = timeline_item::item_detail(app_state.db(), item_id).await?;
        if entry.item.kind != TimelineItemKind::Assignment {
            return Err(DomainError::NotFound("assignment"));
        }
        Ok(entry)
    }
    .await;

    match result {
        Ok(entry) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TimelineEntryResponse::from(entry),
                "Assignment retrieved successfully",
            )),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
