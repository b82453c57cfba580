// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Rollback Orchestrator
//!
//! Runs `mysqlbinlog` over a window of the server's binlog, feeds its stdout
//! through the core parser and synthesizes the rollback script.
//!
//! # Guarantees
//! - stdout is parsed on a blocking worker while stderr is drained concurrently
//! - The first `ERROR:` line on stderr fails the run even if parsing succeeded
//! - The child is killed on cancellation, on parse failure and on drop
//! - The latest matched transaction is undone first

use crate::config::RollbackConfig;
use crate::errors::{NodeError, Result};
use crate::mysqlbinlog;
use crate::telemetry::{EVENTS_PARSED, PARSE_DURATION, SCRIPT_BYTES, TOOL_FAILURES, TRANSACTIONS_MATCHED};
use binlog_rollback::{rollback_script, Catalog, ParseError, ParseResult, Tokenizer, Transaction, TransactionGrouper};
use serde::Deserialize;
use std::io::BufRead;
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncRead};
use tokio::process::Child;
use tokio_util::io::SyncIoBridge;
use tokio_util::sync::CancellationToken;

/// Prefix of the stderr lines the tool uses for fatal conditions.
const FATAL_PREFIX: &str = "ERROR:";

/// Which part of the binlog to read and whose transactions to undo.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RollbackRequest {
    pub binlog_files: Vec<String>,
    pub start_position: u64,
    pub stop_position: u64,
    pub thread_id: String,
}

/// Generates the script undoing every transaction `request.thread_id`
/// committed in the requested binlog window.
pub async fn generate_rollback_sql(
    config: &RollbackConfig,
    request: &RollbackRequest,
    catalog: &Catalog,
    cancel: &CancellationToken,
) -> Result<String> {
    if request.binlog_files.is_empty() {
        return Err(NodeError::Config("no binlog files to read".to_string()));
    }

    let started = Instant::now();
    tracing::info!(
        files = ?request.binlog_files,
        start = request.start_position,
        stop = request.stop_position,
        thread_id = %request.thread_id,
        "Reading binlog window"
    );

    let mut child = mysqlbinlog::command(config, &request.binlog_files, request.start_position, request.stop_position)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| {
            metrics::increment_counter!(TOOL_FAILURES);
            NodeError::Spawn {
                program: config.mysqlbinlog_path.display().to_string(),
                source,
            }
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| NodeError::Io(std::io::Error::other("mysqlbinlog stdout not captured")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| NodeError::Io(std::io::Error::other("mysqlbinlog stderr not captured")))?;

    let stderr_task = tokio::spawn(first_fatal_line(stderr));

    let parse_cancel = cancel.clone();
    let thread_id = request.thread_id.clone();
    let size_limit = config.size_limit_bytes;
    let reader = std::io::BufReader::new(SyncIoBridge::new(stdout));
    let mut parse_task = tokio::task::spawn_blocking(move || {
        parse_stream(reader, &thread_id, size_limit, || parse_cancel.is_cancelled())
    });

    let parsed = tokio::select! {
        joined = &mut parse_task => joined?,
        _ = cancel.cancelled() => {
            tracing::warn!("Rollback generation cancelled, killing mysqlbinlog");
            stop_child(&mut child).await;
            return Err(NodeError::Cancelled);
        }
    };

    let (transactions, events) = match parsed {
        Ok(parsed) => parsed,
        Err(ParseError::Cancelled) => {
            stop_child(&mut child).await;
            return Err(NodeError::Cancelled);
        }
        Err(e) => {
            tracing::error!("Failed to parse mysqlbinlog output: {}", e);
            stop_child(&mut child).await;
            return Err(e.into());
        }
    };

    let status = child.wait().await?;
    if let Some(line) = stderr_task.await?? {
        metrics::increment_counter!(TOOL_FAILURES);
        tracing::error!("mysqlbinlog failed: {}", line);
        return Err(NodeError::BinlogTool { line });
    }
    if !status.success() {
        metrics::increment_counter!(TOOL_FAILURES);
        return Err(NodeError::ToolExit { status });
    }

    metrics::counter!(EVENTS_PARSED, events as u64);
    metrics::counter!(TRANSACTIONS_MATCHED, transactions.len() as u64);
    metrics::histogram!(PARSE_DURATION, started.elapsed().as_secs_f64());

    let script = rollback_script(&transactions, catalog)?;
    metrics::gauge!(SCRIPT_BYTES, script.len() as f64);

    tracing::info!(
        events,
        transactions = transactions.len(),
        bytes = script.len(),
        "Generated rollback script"
    );
    Ok(script)
}

/// Tokenizer into grouper; also reports how many events were classified.
fn parse_stream<R, S>(
    reader: R,
    thread_id: &str,
    size_limit: usize,
    should_stop: S,
) -> ParseResult<(Vec<Transaction>, usize)>
where
    R: BufRead,
    S: FnMut() -> bool,
{
    let mut grouper = TransactionGrouper::new(thread_id);
    let events = Tokenizer::new(size_limit).tokenize(reader, should_stop, |event| grouper.push(event))?;
    Ok((grouper.finish()?, events))
}

/// Drains `stderr`, returning the first fatal line. Everything else is logged.
async fn first_fatal_line<R: AsyncRead + Unpin>(stderr: R) -> std::io::Result<Option<String>> {
    let mut lines = tokio::io::BufReader::new(stderr).lines();
    let mut fatal = None;
    while let Some(line) = lines.next_line().await? {
        if fatal.is_none() && line.starts_with(FATAL_PREFIX) {
            fatal = Some(line);
        } else {
            tracing::warn!("mysqlbinlog: {}", line);
        }
    }
    Ok(fatal)
}

async fn stop_child(child: &mut Child) {
    if let Err(e) = child.kill().await {
        tracing::warn!("Failed to kill mysqlbinlog: {}", e);
    }
}
