use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub const STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates an in-memory SQLite pool with the schema applied
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    ident_db::migrate(&pool)
        .await
        .expect("Failed to apply schema");

    pool
}

/// Use sqlx::query (not query!) to avoid offline mode issues in tests
pub async fn count_identities(pool: &SqlitePool, email: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM identities WHERE email = ?")
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("Failed to count identities")
}
