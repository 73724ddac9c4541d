use api::routes::routes;
use api::state::AppState;
use axum::Router;
use db::test_utils::setup_test_db;

/// Builds a full application router against a fresh in-memory database.
pub async fn make_test_app() -> (Router, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db);
    let app = Router::new().nest("/api", routes(app_state.clone()));
    (app, app_state)
}
