//! Service configuration as read from YAML or the environment.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Deployment name, e.g. `development` or `production`. Only logged.
    #[serde(default = "default_env")]
    pub env: String,
    /// SQLite database file. Created if missing.
    pub storage_path: String,
    #[serde(default)]
    pub http_server: HttpServerConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    /// How long in-flight requests get to finish after a shutdown signal.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            shutdown_grace_secs: default_shutdown_grace_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl HttpServerConfig {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

pub(crate) fn default_env() -> String {
    "development".to_string()
}

pub(crate) fn default_address() -> String {
    "127.0.0.1:8082".to_string()
}

pub(crate) fn default_shutdown_grace_secs() -> u64 {
    5
}

pub(crate) fn default_max_body_bytes() -> usize {
    1024 * 1024
}
