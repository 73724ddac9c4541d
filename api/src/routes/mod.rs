//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness check (public)
//! - `/courses/{course_id}/...` → timeline, posts, assignments, submissions
//!   (authenticated users; mutations behind role guards)

use crate::auth::guards::allow_authenticated;
use crate::routes::{courses::courses_routes, health::health_routes};
use crate::state::AppState;
use axum::{Router, middleware::from_fn};

pub mod courses;
pub mod health;

/// Builds the complete application router for all HTTP endpoints.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest(
            "/courses",
            courses_routes(app_state.clone()).route_layer(from_fn(allow_authenticated)),
        )
        .with_state(app_state)
}
