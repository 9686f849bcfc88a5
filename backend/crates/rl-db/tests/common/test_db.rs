use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    rl_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Creates a file-backed pool (WAL, several connections) in a temp directory
///
/// Keep the returned `TempDir` alive for as long as the pool is used.
pub async fn create_file_pool() -> (tempfile::TempDir, SqlitePool) {
    let temp = tempfile::TempDir::new().expect("Failed to create temp dir");
    let pool = rl_db::connect(&temp.path().join("identities.db"))
        .await
        .expect("Failed to create file pool");
    (temp, pool)
}
