use crate::state::AppState;
use axum::{Router, routing::get};

pub mod comments;
pub mod get;

use get::{get_course_timeline, get_timeline_item};

pub fn timeline_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_course_timeline))
        .route("/{item_id}", get(get_timeline_item))
        .nest("/{item_id}/comments", comments::comment_routes(app_state))
}
