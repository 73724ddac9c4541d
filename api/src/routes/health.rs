use crate::auth::guards::Empty;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}

async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success(Empty, "Service is healthy")),
    )
}
