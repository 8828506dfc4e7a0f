//! Common routes: welcome, health, version.

use crate::response::Response;
use axum::{routing::get, Json, Router};

pub const WELCOME_TEXT: &str = "Welcome to students api";

async fn welcome() -> &'static str {
    WELCOME_TEXT
}

async fn health() -> Json<Response> {
    Json(Response::ok())
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Common routes (no state): GET /, GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/version", get(version))
}
