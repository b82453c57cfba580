// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use binlog_rollback::{ParseError, RollbackError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NodeError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Rollback error: {0}")]
    Rollback(#[from] RollbackError),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// First fatal line the tool wrote to stderr.
    #[error("mysqlbinlog reported: {line}")]
    BinlogTool { line: String },

    #[error("mysqlbinlog exited with {status}")]
    ToolExit { status: std::process::ExitStatus },

    #[error("Invalid binlog file name {name:?}: {reason}")]
    InvalidBinlogName { name: String, reason: String },

    #[error("Rollback generation cancelled")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl NodeError {
    pub fn is_size_limit_exceeded(&self) -> bool {
        matches!(self, NodeError::Parse(e) if e.is_size_limit_exceeded())
    }
}

pub type Result<T> = std::result::Result<T, NodeError>;
