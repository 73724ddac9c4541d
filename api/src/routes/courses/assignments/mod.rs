use crate::auth::guards::allow_instructor;
use crate::state::AppState;
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
};

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;
pub mod submissions;

use self::delete::delete_assignment;
use self::get::{get_assignment, get_course_assignments};
use self::post::create_assignment;
use self::put::edit_assignment;

pub fn assignment_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_assignment)
                .route_layer(from_fn_with_state(app_state.clone(), allow_instructor)),
        )
        .route(
            "/{item_id}",
            put(edit_assignment)
                .route_layer(from_fn_with_state(app_state.clone(), allow_instructor)),
        )
        .route(
            "/{item_id}",
            delete(delete_assignment)
                .route_layer(from_fn_with_state(app_state.clone(), allow_instructor)),
        )
        .route("/", get(get_course_assignments))
        .route("/{item_id}", get(get_assignment))
        .nest(
            "/{item_id}/submissions",
            submissions::submission_routes(app_state),
        )
}
