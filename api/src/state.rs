//! Application state container shared across Axum route handlers.

use sea_orm::DatabaseConnection;

/// Central application state: a cloned, thread-safe database connection
/// passed into handlers via Axum's `State<T>` extractor.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a cloned copy of the database connection, for tasks that
    /// require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }
}
