//! Request extractors.

mod student_id;
pub use student_id::StudentId;
