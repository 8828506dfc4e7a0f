//! Route registration and the middleware stack shared by every route.

mod common;
mod student;

pub use common::{common_routes, WELCOME_TEXT};
pub use student::student_routes;

use crate::response::{write_json, Response};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, http::StatusCode, Router};
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

pub const INTERNAL_ERROR_TEXT: &str = "internal server error";

/// Full application router: common + student routes behind tracing, panic catching and a body limit.
/// `max_body_bytes` is the only limit; axum's built-in 2 MiB default is turned off.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(student_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");
    write_json(
        StatusCode::INTERNAL_SERVER_ERROR,
        Response::general_error(INTERNAL_ERROR_TEXT),
    )
}
