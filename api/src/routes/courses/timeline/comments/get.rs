use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::{comment::Model as CommentModel, timeline_item};

use crate::auth::guards::Empty;
use crate::response::{ApiResponse, domain_error_response};
use crate::routes::courses::common::CommentResponse;
use crate::state::AppState;
use db::error::DomainError;

/// GET /api/courses/{course_id}/timeline/{item_id}/comments
pub async fn get_comments(
    State(app_state): State<AppState>,
    Path((_course_id, item_id)): Path<(i64, i64)>,
) -> Response {
    let db = app_state.db();

    let result: Result<Vec<CommentResponse>, DomainError> = async {
        timeline_item::Model::find_active(db, item_id)
            .await?
            .ok_or(DomainError::NotFound("timeline item"))?;

        let comments = CommentModel::list_for_item(db, item_id).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
    .await;

    match result {
        Ok(data) => (
            StatusCode::OK,
            Json(ApiResponse::success(data, "Comments retrieved successfully")),
        )
            .into_response(),
        Err(err) => domain_error_response::<Empty>(err).into_response(),
    }
}
