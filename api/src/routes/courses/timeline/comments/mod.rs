use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use self::delete::delete_comment;
use self::get::get_comments;
use self::post::create_comment;
use self::put::edit_comment;

pub fn comment_routes(_app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(get_comments))
        .route("/", post(create_comment))
        .route("/{comment_id}", put(edit_comment))
        .route("/{comment_id}", delete(delete_comment))
}
