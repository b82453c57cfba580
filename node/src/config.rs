// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::errors::{NodeError, Result};
use binlog_rollback::config::DEFAULT_SIZE_LIMIT;
use serde::Deserialize;
use std::path::PathBuf;

pub const ENV_MYSQLBINLOG: &str = "ROLLBACK_MYSQLBINLOG";
pub const ENV_HOST: &str = "ROLLBACK_HOST";
pub const ENV_PORT: &str = "ROLLBACK_PORT";
pub const ENV_USER: &str = "ROLLBACK_USER";
pub const ENV_PASSWORD: &str = "ROLLBACK_PASSWORD";
pub const ENV_SIZE_LIMIT: &str = "ROLLBACK_SIZE_LIMIT";

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub ssl_ca: Option<PathBuf>,
    pub ssl_cert: Option<PathBuf>,
    pub ssl_key: Option<PathBuf>,
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    pub password: Option<String>,
    pub tls: TlsConfig,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: None,
            user: "root".to_string(),
            password: None,
            tls: TlsConfig::default(),
        }
    }
}

// Keeps the password out of logs.
impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("tls", &self.tls)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RollbackConfig {
    pub mysqlbinlog_path: PathBuf,
    pub connection: ConnectionConfig,
    /// Ceiling on accumulated event body text per run.
    pub size_limit_bytes: usize,
    pub verify_checksum: bool,
}

impl Default for RollbackConfig {
    fn default() -> Self {
        Self {
            mysqlbinlog_path: PathBuf::from("mysqlbinlog"),
            connection: ConnectionConfig::default(),
            size_limit_bytes: DEFAULT_SIZE_LIMIT,
            verify_checksum: true,
        }
    }
}

impl RollbackConfig {
    /// Defaults overlaid with the `ROLLBACK_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlays the values `lookup` returns for the `ROLLBACK_*` keys.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_MYSQLBINLOG) {
            self.mysqlbinlog_path = PathBuf::from(path);
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.connection.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.connection.port = Some(parse_number(ENV_PORT, &port)?);
        }
        if let Some(user) = lookup(ENV_USER) {
            self.connection.user = user;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.connection.password = Some(password);
        }
        if let Some(limit) = lookup(ENV_SIZE_LIMIT) {
            self.size_limit_bytes = parse_number(ENV_SIZE_LIMIT, &limit)?;
        }
        Ok(self)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| NodeError::Config(format!("{key} must be a number, got {value:?}")))
}
