// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Binlog file names: `<base>.<sequence>`.
//!
//! The server does not wrap the sequence at 999999; it keeps counting
//! (`binlog.1000000`), so names must be ordered by number, never as strings.

use crate::errors::{NodeError, Result};

/// Splits `binlog.000002` into `("binlog", 2)`.
pub fn parse_binlog_name(name: &str) -> Result<(&str, u64)> {
    let parts: Vec<&str> = name.split('.').collect();
    let [base, ext] = parts.as_slice() else {
        return Err(NodeError::InvalidBinlogName {
            name: name.to_string(),
            reason: format!("expected two '.'-separated parts, got {}", parts.len()),
        });
    };
    let seq = ext.parse().map_err(|_| NodeError::InvalidBinlogName {
        name: name.to_string(),
        reason: format!("sequence {ext:?} is not a number"),
    })?;
    Ok((*base, seq))
}

/// Names for every sequence in `start..=end`, zero-padded to six digits.
pub fn gen_binlog_file_names(base: &str, start: u64, end: u64) -> Vec<String> {
    (start..=end).map(|seq| format!("{base}.{seq:06}")).collect()
}

/// Orders binlog file names by numeric sequence.
pub fn sort_binlog_files(names: &[String]) -> Result<Vec<String>> {
    let mut keyed = names
        .iter()
        .map(|name| parse_binlog_name(name).map(|(_, seq)| (seq, name.clone())))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by_key(|(seq, _)| *seq);
    Ok(keyed.into_iter().map(|(_, name)| name).collect())
}
