// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Drives `mysqlbinlog` against a live server and turns its output into a
//! rollback script with the `binlog-rollback` core.
pub mod config;
pub mod errors;
pub mod telemetry;
pub mod binlog_file;
pub mod mysqlbinlog;
pub mod orchestrator;

pub use config::{ConnectionConfig, RollbackConfig, TlsConfig};
pub use errors::{NodeError, Result};
pub use orchestrator::{generate_rollback_sql, RollbackRequest};
