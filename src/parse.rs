// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Stream parsing entry points: Tokenizer feeding the Transaction Grouper.

use crate::error::ParseResult;
use crate::tokenizer::Tokenizer;
use crate::transaction::{Transaction, TransactionGrouper};
use std::io::BufRead;

/// Parses `reader` and returns the transactions executed by `thread_id`.
///
/// All or nothing: any error discards the transactions gathered so far.
pub fn parse<R: BufRead>(reader: R, thread_id: &str, size_limit: usize) -> ParseResult<Vec<Transaction>> {
    parse_with_cancel(reader, thread_id, size_limit, || false)
}

/// [`parse`] with a cooperative stop check polled once per input line.
pub fn parse_with_cancel<R, S>(
    reader: R,
    thread_id: &str,
    size_limit: usize,
    should_stop: S,
) -> ParseResult<Vec<Transaction>>
where
    R: BufRead,
    S: FnMut() -> bool,
{
    let mut grouper = TransactionGrouper::new(thread_id);
    let events = Tokenizer::new(size_limit).tokenize(reader, should_stop, |event| grouper.push(event))?;
    let transactions = grouper.finish()?;

    tracing::debug!(
        thread_id,
        events,
        transactions = transactions.len(),
        "parsed binlog stream"
    );
    Ok(transactions)
}
