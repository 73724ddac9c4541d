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

use self::delete::delete_post;
use self::get::{get_course_posts, get_post};
use self::post::create_post;
use self::put::edit_post;

pub fn post_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_post)
                .route_layer(from_fn_with_state(app_state.clone(), allow_instructor)),
        )
        .route(
            "/{item_id}",
            put(edit_post).route_layer(from_fn_with_state(app_state.clone(), allow_instructor)),
        )
        .route(
            "/{item_id}",
            delete(delete_post)
                .route_layer(from_fn_with_state(app_state.clone(), allow_instructor)),
        )
        .route("/", get(get_course_posts))
        .route("/{item_id}", get(get_post))
}
