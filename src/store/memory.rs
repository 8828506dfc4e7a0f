//! In-memory student store.

use super::{Student, StoreError, StoreResult, StudentStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Student>,
}

/// Keeps students in an id-ordered map. Ids start at 1 like SQLite's rowid.
#[derive(Default)]
pub struct MemoryStudentStore {
    inner: RwLock<Inner>,
}

impl MemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

#[async_trait]
impl StudentStore for MemoryStudentStore {
    async fn create_student(&self, name: &str, email: &str, age: i64) -> StoreResult<i64> {
        let mut inner = self.inner.write().await;
        let id = inner.last_id + 1;
        inner.last_id = id;
        inner.rows.insert(
            id,
            Student {
                id,
                name: name.to_string(),
                email: email.to_string(),
                age,
            },
        );
        Ok(id)
    }

    async fn get_student_by_id(&self, id: i64) -> StoreResult<Student> {
        self.inner
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn get_students(&self) -> StoreResult<Vec<Student>> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }
}
