use crate::auth::guards::{allow_instructor, allow_student};
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};

pub mod common;
pub mod get;
pub mod post;
pub mod put;

use self::get::get_assignment_submissions;
use self::post::submit_assignment;
use self::put::grade_submission;

pub fn submission_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(submit_assignment)
                .route_layer(from_fn_with_state(app_state.clone(), allow_student)),
        )
        .route(
            "/",
            get(get_assignment_submissions)
                .route_layer(from_fn_with_state(app_state.clone(), allow_instructor)),
        )
        .route(
            "/{submission_id}/grade",
            put(grade_submission)
                .route_layer(from_fn_with_state(app_state.clone(), allow_instructor)),
        )
}
