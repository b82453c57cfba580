// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;

use binlog_rollback::{EventKind, Transaction};
use std::path::Path;

/// One row of the inspect report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    pub index: usize,
    pub thread_id: Option<String>,
    pub events: usize,
    pub row_events: Vec<EventKind>,
    pub end_position: Option<u64>,
    /// False when the window ended before the transaction's `Xid`.
    pub closed: bool,
}

pub fn summarize(txns: &[Transaction]) -> anyhow::Result<Vec<TransactionSummary>> {
    txns.iter()
        .enumerate()
        .map(|(index, txn)| -> anyhow::Result<TransactionSummary> {
            Ok(TransactionSummary {
                index,
                thread_id: txn.thread_id()?.map(str::to_string),
                events: txn.len(),
                row_events: txn
                    .events()
                    .iter()
                    .map(|e| e.kind)
                    .filter(|kind| kind.is_row_mutation())
                    .collect(),
                end_position: txn.last().and_then(|e| e.position()),
                closed: txn.is_closed(),
            })
        })
        .collect()
}

pub fn run(dump: &Path, thread_id: &str, size_limit: usize, json: bool) -> anyhow::Result<()> {
    let txns = super::parse_dump(dump, thread_id, size_limit)?;
    let summaries = summarize(&txns)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("\nTransactions of thread {} in {}", thread_id, dump.display());
    println!("--------------------");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Thread", "Events", "Row Events", "End Position"]);

    for s in &summaries {
        let kinds = s
            .row_events
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let position = match (s.end_position, s.closed) {
            (Some(pos), true) => pos.to_string(),
            (Some(pos), false) => format!("{pos} (open)"),
            (None, _) => "-".to_string(),
        };
        table.add_row(vec![
            s.index.to_string(),
            s.thread_id.clone().unwrap_or_default(),
            s.events.to_string(),
            kinds,
            position,
        ]);
    }

    println!("{table}");
    println!("{} transaction(s)", summaries.len());
    Ok(())
}
