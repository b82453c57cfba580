// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod generate;
pub mod inspect;
pub mod run;

use anyhow::Context;
use binlog_rollback::Transaction;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parses a captured `mysqlbinlog -v` dump for `thread_id`.
pub(crate) fn parse_dump(path: &Path, thread_id: &str, size_limit: usize) -> anyhow::Result<Vec<Transaction>> {
    let file = File::open(path).with_context(|| format!("failed to open dump {}", path.display()))?;
    binlog_rollback::parse(BufReader::new(file), thread_id, size_limit)
        .with_context(|| format!("failed to parse dump {}", path.display()))
}
