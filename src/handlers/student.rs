//! Student handlers: create, read by id, list.

use crate::error::AppError;
use crate::extractors::StudentId;
use crate::response::{write_json, Created};
use crate::service::{RequestValidator, STUDENT_RULES};
use crate::state::AppState;
use crate::store::NewStudent;
use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Map, Value};

fn is_json_whitespace(b: &u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Decode a create body into a JSON object. Blank bodies get their own error.
fn decode_body(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    if body.iter().all(is_json_whitespace) {
        return Err(AppError::EmptyBody);
    }
    match serde_json::from_slice(body).map_err(|e| AppError::Decode(e.to_string()))? {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::Decode("body must be a JSON object".into())),
    }
}

pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("creating a student");
    let body = decode_body(&body)?;
    RequestValidator::validate(&body, STUDENT_RULES)?;
    let student: NewStudent =
        serde_json::from_value(Value::Object(body)).map_err(|e| AppError::Decode(e.to_string()))?;
    let id = state
        .store
        .create_student(&student.name, &student.email, student.age)
        .await?;
    tracing::info!(student_id = id, "student created");
    Ok(write_json(StatusCode::CREATED, Created { id }))
}

pub async fn read(
    State(state): State<AppState>,
    StudentId(id): StudentId,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(student_id = id, "getting student");
    let student = state.store.get_student_by_id(id).await?;
    Ok(write_json(StatusCode::OK, student))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("listing students");
    let students = state.store.get_students().await?;
    Ok(write_json(StatusCode::OK, students))
}
