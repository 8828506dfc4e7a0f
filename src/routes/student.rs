//! Student routes. `:id` is parsed by the `StudentId` extractor.

use crate::handlers::student::{create, list, read};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(list).post(create))
        .route("/students/:id", get(read))
        .with_state(state)
}
