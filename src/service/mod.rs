//! Request validation for student payloads.

mod validation;
pub use validation::{FieldRule, Format, RequestValidator, STUDENT_RULES};
