use crate::state::AppState;
use axum::{Router, routing::get};

pub mod assignments;
pub mod common;
pub mod posts;
pub mod timeline;

use assignments::submissions::get::get_student_course_submissions;

pub fn courses_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .nest(
            "/{course_id}/timeline",
            timeline::timeline_routes(app_state.clone()),
        )
        .nest("/{course_id}/posts", posts::post_routes(app_state.clone()))
        .nest(
            "/{course_id}/assignments",
            assignments::assignment_routes(app_state.clone()),
        )
        .route(
            "/{course_id}/students/{student_id}/submissions",
            get(get_student_course_submissions),
        )
}
