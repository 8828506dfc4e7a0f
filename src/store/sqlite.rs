//! SQLite-backed student store.

use super::{Student, StoreError, StoreResult, StudentStore};
use crate::migration::{apply_migrations, STUDENTS_TABLE};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

const MAX_CONNECTIONS: u32 = 5;

type StudentRow = (i64, String, String, i64);

fn row_to_student((id, name, email, age): StudentRow) -> Student {
    Student { id, name, email, age }
}

pub struct SqliteStudentStore {
    pool: SqlitePool,
}

impl SqliteStudentStore {
    /// Open (creating if missing) the database file at `storage_path` and apply migrations.
    pub async fn connect(storage_path: &str) -> StoreResult<Self> {
        if let Some(parent) = Path::new(storage_path).parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Connection(format!("create {}: {}", parent.display(), e)))?;
        }
        let opts = SqliteConnectOptions::new()
            .filename(storage_path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(opts)
            .await?;
        Self::from_pool(pool).await
    }

    /// Private in-memory database. A single connection that never expires keeps the data alive.
    pub async fn in_memory() -> StoreResult<Self> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        apply_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl StudentStore for SqliteStudentStore {
    async fn create_student(&self, name: &str, email: &str, age: i64) -> StoreResult<i64> {
        let sql = format!("INSERT INTO {} (name, email, age) VALUES (?, ?, ?)", STUDENTS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let result = sqlx::query(&sql)
            .bind(name)
            .bind(email)
            .bind(age)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn get_student_by_id(&self, id: i64) -> StoreResult<Student> {
        let sql = format!("SELECT id, name, email, age FROM {} WHERE id = ?", STUDENTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<StudentRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_student).ok_or(StoreError::NotFound { id })
    }

    async fn get_students(&self) -> StoreResult<Vec<Student>> {
        let sql = format!("SELECT id, name, email, age FROM {} ORDER BY id", STUDENTS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows: Vec<StudentRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(row_to_student).collect())
    }
}
