//! Load service config from a YAML file (`--config` / `CONFIG_PATH`) or from environment variables.

use crate::config::types::*;
use crate::error::ConfigError;
use std::str::FromStr;

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const ENV_NAME_ENV: &str = "APP_ENV";
pub const STORAGE_PATH_ENV: &str = "STORAGE_PATH";
pub const HTTP_ADDRESS_ENV: &str = "HTTP_ADDRESS";
pub const SHUTDOWN_GRACE_ENV: &str = "SHUTDOWN_GRACE_SECS";
pub const MAX_BODY_BYTES_ENV: &str = "MAX_BODY_BYTES";

impl ServiceConfig {
    /// Resolve config once at startup. An explicit path wins over `CONFIG_PATH`; with neither, the environment is used.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let path = config_path
            .map(str::to_string)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok())
            .filter(|p| !p.trim().is_empty());
        match path {
            Some(p) => Self::from_file(&p),
            None => Self::from_env(),
        }
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(path, &raw)
    }

    /// Parse YAML; `origin` is only used in error messages.
    pub fn from_yaml(origin: &str, raw: &str) -> Result<Self, ConfigError> {
        let config: ServiceConfig = serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.checked()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let config = ServiceConfig {
            env: get(ENV_NAME_ENV).unwrap_or_else(default_env),
            storage_path: get(STORAGE_PATH_ENV).ok_or(ConfigError::Missing("storage_path"))?,
            http_server: HttpServerConfig {
                address: get(HTTP_ADDRESS_ENV).unwrap_or_else(default_address),
                shutdown_grace_secs: parse_or(get(SHUTDOWN_GRACE_ENV), SHUTDOWN_GRACE_ENV, default_shutdown_grace_secs)?,
                max_body_bytes: parse_or(get(MAX_BODY_BYTES_ENV), MAX_BODY_BYTES_ENV, default_max_body_bytes)?,
            },
        };
        config.checked()
    }

    fn checked(self) -> Result<Self, ConfigError> {
        if self.storage_path.trim().is_empty() {
            return Err(ConfigError::Missing("storage_path"));
        }
        if self.http_server.address.trim().is_empty() {
            return Err(ConfigError::Missing("http_server.address"));
        }
        if self.http_server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid {
                key: "http_server.max_body_bytes",
                value: "0".into(),
            });
        }
        Ok(self)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &'static str, default: fn() -> T) -> Result<T, ConfigError> {
    match value {
        None => Ok(default()),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { key, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn yaml_with_all_fields() {
        let raw = r#"
env: production
storage_path: storage/storage.db
http_server:
  address: 0.0.0.0:9000
  shutdown_grace_secs: 10
  max_body_bytes: 2048
"#;
        let config = ServiceConfig::from_yaml("inline", raw).unwrap();
        assert_eq!(config.env, "production");
        assert_eq!(config.storage_path, "storage/storage.db");
        assert_eq!(config.http_server.address, "0.0.0.0:9000");
        assert_eq!(config.http_server.shutdown_grace().as_secs(), 10);
        assert_eq!(config.http_server.max_body_bytes, 2048);
    }

    #[test]
    fn yaml_defaults_apply() {
        let config = ServiceConfig::from_yaml("inline", "storage_path: s.db\n").unwrap();
        assert_eq!(config.env, "development");
        assert_eq!(config.http_server, HttpServerConfig::default());
        assert_eq!(config.http_server.shutdown_grace().as_secs(), 5);
    }

    #[test]
    fn yaml_without_storage_path_is_parse_error() {
        let err = ServiceConfig::from_yaml("inline", "env: dev\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn blank_storage_path_is_missing() {
        let err = ServiceConfig::from_yaml("inline", "storage_path: ''\n").unwrap_err();
        assert!(matches!(err, ConfigError::Missing("storage_path")));
    }

    #[test]
    fn file_is_read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage_path: /tmp/students.db").unwrap();
        let config = ServiceConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.storage_path, "/tmp/students.db");
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = ServiceConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn explicit_path_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage_path: explicit.db").unwrap();
        let config = ServiceConfig::load(file.path().to_str()).unwrap();
        assert_eq!(config.storage_path, "explicit.db");
    }

    #[test]
    fn env_lookup_with_defaults() {
        let config = ServiceConfig::from_lookup(lookup(&[(STORAGE_PATH_ENV, "env.db")])).unwrap();
        assert_eq!(config.storage_path, "env.db");
        assert_eq!(config.env, "development");
        assert_eq!(config.http_server, HttpServerConfig::default());
    }

    #[test]
    fn env_lookup_overrides() {
        let config = ServiceConfig::from_lookup(lookup(&[
            (STORAGE_PATH_ENV, "env.db"),
            (ENV_NAME_ENV, "staging"),
            (HTTP_ADDRESS_ENV, "0.0.0.0:1234"),
            (SHUTDOWN_GRACE_ENV, "2"),
            (MAX_BODY_BYTES_ENV, "512"),
        ]))
        .unwrap();
        assert_eq!(config.env, "staging");
        assert_eq!(config.http_server.address, "0.0.0.0:1234");
        assert_eq!(config.http_server.shutdown_grace_secs, 2);
        assert_eq!(config.http_server.max_body_bytes, 512);
    }

    #[test]
    fn env_lookup_requires_storage_path() {
        let err = ServiceConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("storage_path")));
    }

    #[test]
    fn env_lookup_rejects_bad_numbers() {
        let err = ServiceConfig::from_lookup(lookup(&[
            (STORAGE_PATH_ENV, "env.db"),
            (SHUTDOWN_GRACE_ENV, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: SHUTDOWN_GRACE_ENV, .. }));
    }
}
