// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod catalog;
pub mod commands;

use binlog_rollback::ParseError;
use binlog_rollback_node::NodeError;

/// True when any cause in `err` is the retryable size ceiling.
pub fn hit_size_limit(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<ParseError>()
            .is_some_and(ParseError::is_size_limit_exceeded)
            || cause
                .downcast_ref::<NodeError>()
                .is_some_and(NodeError::is_size_limit_exceeded)
    })
}
