//! Typed errors and HTTP mapping.

use crate::response::{write_json, Response as Envelope};
use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("missing config value: {0}")]
    Missing(&'static str),
    #[error("invalid config value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("request body is empty")]
    EmptyBody,
    #[error("{0}")]
    Decode(String),
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("invalid student id {raw:?}: {reason}")]
    InvalidId { raw: String, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyBody
            | AppError::Decode(_)
            | AppError::Validation(_)
            | AppError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn envelope(&self) -> Envelope {
        match self {
            AppError::Validation(messages) => Envelope::validation_error(messages),
            other => Envelope::general_error(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }
        write_json(status, self.envelope())
    }
}
