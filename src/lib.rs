//! Student API: REST service for student records backed by SQLite.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;
pub mod store;

pub use config::{HttpServerConfig, ServiceConfig};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use response::{write_json, Created, Response};
pub use routes::{app, common_routes, student_routes};
pub use server::{shutdown_signal, Server, ServerError};
pub use state::AppState;
pub use store::{MemoryStudentStore, NewStudent, SqliteStudentStore, Student, StoreError, StudentStore};
