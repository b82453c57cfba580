// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! binlog-rollback: reconstructs the inverse SQL of a previously executed
//! transaction from `mysqlbinlog -v` text output, without a database snapshot.
//!
//! Raw text → [`tokenizer`] → events → [`transaction`] grouper + thread filter
//! → transactions → [`rollback`] synthesizer → rollback script.

pub mod config;
pub mod error;
pub mod event;
pub mod tokenizer;
pub mod transaction;
pub mod rollback;
pub mod parse;

pub use error::{ParseError, ParseResult, RollbackError, RollbackResult};
pub use event::{Event, EventKind};
pub use parse::{parse, parse_with_cancel};
pub use rollback::{rollback_event, rollback_script, synthesize_rollback, Catalog};
pub use tokenizer::Tokenizer;
pub use transaction::{matches_thread_id, Transaction, TransactionGrouper};

#[cfg(test)]
pub mod tests;
