use tempfile::TempDir;

use todo_db::{Database, DatabaseConfig};

/// Creates a migrated SQLite database in a fresh temporary directory.
///
/// The `TempDir` must be kept in scope for the test duration —
/// dropping it deletes the database file.
pub async fn setup_test_db() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("todo_test.db").display()),
        max_connections: 5,
    };

    let db = Database::connect(&config)
        .await
        .expect("Failed to open test database");
    db.migrate().await.expect("Failed to run migrations");

    (db, dir)
}
