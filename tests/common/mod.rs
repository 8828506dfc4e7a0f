//! Shared helpers for router-level tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use student_api::{app, AppState, MemoryStudentStore, StoreError, Student, StudentStore};
use tower::ServiceExt;

pub const MAX_BODY_BYTES: usize = 4 * 1024;

/// Wraps a store and counts every call that reaches it.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStudentStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StudentStore for CountingStore {
    async fn create_student(&self, name: &str, email: &str, age: i64) -> Result<i64, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create_student(name, email, age).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Student, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_student_by_id(id).await
    }

    async fn get_students(&self) -> Result<Vec<Student>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_students().await
    }
}

/// Every call fails as if the database were unreachable.
pub struct FailingStore;

#[async_trait]
impl StudentStore for FailingStore {
    async fn create_student(&self, _: &str, _: &str, _: i64) -> Result<i64, StoreError> {
        Err(StoreError::Connection("database is unavailable".into()))
    }

    async fn get_student_by_id(&self, _: i64) -> Result<Student, StoreError> {
        Err(StoreError::Connection("database is unavailable".into()))
    }

    async fn get_students(&self) -> Result<Vec<Student>, StoreError> {
        Err(StoreError::Connection("database is unavailable".into()))
    }
}

/// Panics on every call.
pub struct PanickingStore;

#[async_trait]
impl StudentStore for PanickingStore {
    async fn create_student(&self, _: &str, _: &str, _: i64) -> Result<i64, StoreError> {
        panic!("create exploded")
    }

    async fn get_student_by_id(&self, _: i64) -> Result<Student, StoreError> {
        panic!("read exploded")
    }

    async fn get_students(&self) -> Result<Vec<Student>, StoreError> {
        panic!("list exploded")
    }
}

pub fn test_app(store: Arc<dyn StudentStore>) -> Router {
    app(AppState::new(store), MAX_BODY_BYTES)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub async fn send_json(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(app, request).await;
    let json = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!("body is not JSON ({e}): {}", String::from_utf8_lossy(&body))
    });
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}
