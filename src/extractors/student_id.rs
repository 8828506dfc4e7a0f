//! Extract the integer student id from the `:id` path segment.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Parsed `:id` path parameter. Rejects before the handler runs, so storage is never queried for a bad id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StudentId(pub i64);

impl StudentId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        raw.parse::<i64>()
            .map(StudentId)
            .map_err(|e| AppError::InvalidId {
                raw: raw.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for StudentId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidId {
                raw: parts.uri.path().to_string(),
                reason: e.body_text(),
            })?;
        StudentId::parse(&raw)
    }
}
