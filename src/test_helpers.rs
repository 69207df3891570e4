use std::sync::Arc;

use sea_orm::{ConnectOptions, Database};

use crate::state::AppState;

/// State backed by a fresh in-memory SQLite database with the schema synced.
/// `sqlite::memory:` gives every pooled connection its own database, so the
/// pool is pinned to a single connection.
pub async fn test_state() -> Arc<AppState> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect to sqlite");
    db.get_schema_registry("todo_server::db::entities::*")
        .sync(&db)
        .await
        .expect("sync schema");

    AppState::new(db)
}
