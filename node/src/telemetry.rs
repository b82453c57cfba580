// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const TRANSACTIONS_MATCHED: &str = "rollback_transactions_matched_total";
pub const EVENTS_PARSED: &str = "rollback_events_parsed_total";
pub const PARSE_DURATION: &str = "rollback_parse_duration_seconds";
pub const SCRIPT_BYTES: &str = "rollback_script_bytes";
pub const TOOL_FAILURES: &str = "rollback_tool_failures_total";

/// Initialize telemetry (logs + metrics)
pub fn init_telemetry() {
    // Logs go to stderr; stdout carries the generated script.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "binlog_rollback=info,binlog_rollback_node=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if PROM_HANDLE.set(handle).is_err() {
                tracing::warn!("Prometheus handle already set. Telemetry re-initialized?");
            }
        }
        Err(e) => {
            tracing::warn!("Failed to install Prometheus recorder: {}", e);
            return;
        }
    }

    metrics::describe_counter!(TRANSACTIONS_MATCHED, "Transactions of the target thread found in the binlog window");
    metrics::describe_counter!(EVENTS_PARSED, "Classified events handed to the transaction grouper");
    metrics::describe_histogram!(PARSE_DURATION, "Time from spawning mysqlbinlog to a parsed stream");
    metrics::describe_gauge!(SCRIPT_BYTES, "Size of the last generated rollback script in bytes");
    metrics::describe_counter!(TOOL_FAILURES, "mysqlbinlog runs that failed to start, exited non-zero or reported ERROR");
}

/// Get the Prometheus handle to render metrics
pub fn get_metrics() -> String {
    if let Some(handle) = PROM_HANDLE.get() {
        handle.render()
    } else {
        "# metrics not initialized".to_string()
    }
}
