//! Standard response envelope helpers.
//!
//! Successful responses carry the domain payload as-is; failures carry a
//! [`Response`] envelope with `status = "Error"` and a non-empty `error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response as HttpResponse},
    Json,
};
use serde::Serialize;
use std::fmt::Display;

pub const STATUS_OK: &str = "OK";
pub const STATUS_ERR: &str = "Error";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Response {
    pub status: &'static str,
    pub error: String,
}

impl Response {
    pub fn ok() -> Self {
        Response {
            status: STATUS_OK,
            error: String::new(),
        }
    }

    /// Envelope for a single failure. An empty message still yields a non-empty `error`.
    pub fn general_error(err: impl Display) -> Self {
        let mut error = err.to_string();
        if error.is_empty() {
            error.push_str("unknown error");
        }
        Response {
            status: STATUS_ERR,
            error,
        }
    }

    /// Envelope for field validation failures, one message per field.
    pub fn validation_error(messages: &[String]) -> Self {
        Self::general_error(messages.join(", "))
    }

    pub fn is_error(&self) -> bool {
        self.status == STATUS_ERR
    }
}

/// Body returned by a successful create.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Created {
    pub id: i64,
}

/// Serialize `payload` as JSON with the given status code.
pub fn write_json<T: Serialize>(status: StatusCode, payload: T) -> HttpResponse {
    (status, Json(payload)).into_response()
}
