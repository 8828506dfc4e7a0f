//! Initial schema for the SQLite backend. Idempotent; safe to run on every start.

use crate::store::StoreResult;
use sqlx::SqlitePool;

pub const STUDENTS_TABLE: &str = "students";

/// Create the students table if it does not exist yet.
pub async fn apply_migrations(pool: &SqlitePool) -> StoreResult<()> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            age INTEGER NOT NULL
        )
        "#,
        STUDENTS_TABLE
    );
    tracing::debug!(table = STUDENTS_TABLE, "applying migrations");
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}
