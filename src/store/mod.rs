//! Student storage port and its backends.
//!
//! Handlers only see [`StudentStore`]; the SQLite backend is used in production
//! and the in-memory backend in tests and ephemeral runs.

mod memory;
mod sqlite;

pub use memory::MemoryStudentStore;
pub use sqlite::SqliteStudentStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored student. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// Validated create payload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub age: i64,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no student found with id {id}")]
    NotFound { id: i64 },
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("database connection error: {0}")]
    Connection(String),
    #[error("database query error: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db)
                if db.is_unique_violation() || db.is_check_violation() || db.is_foreign_key_violation() =>
            {
                StoreError::Constraint(db.message().to_string())
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Connection(e.to_string()),
            _ => StoreError::Query(e.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence operations for students.
///
/// Each call is atomic on its own; nothing is retried.
#[async_trait]
pub trait StudentStore: Send + Sync + 'static {
    /// Inserts a student and returns the id assigned by storage.
    async fn create_student(&self, name: &str, email: &str, age: i64) -> StoreResult<i64>;

    /// Fetches one student. Unknown ids yield [`StoreError::NotFound`].
    async fn get_student_by_id(&self, id: i64) -> StoreResult<Student>;

    /// All students ordered by id; empty when none exist.
    async fn get_students(&self) -> StoreResult<Vec<Student>>;
}
