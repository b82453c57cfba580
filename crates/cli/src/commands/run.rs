// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::{bail, Context};
use clap::Args;
use std::path::{Path, PathBuf};

use binlog_rollback_node::binlog_file::{gen_binlog_file_names, sort_binlog_files};
use binlog_rollback_node::{generate_rollback_sql, RollbackConfig, RollbackRequest};
use tokio_util::sync::CancellationToken;

use crate::catalog::load_catalog;

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Binlog file to read (repeatable), e.g. binlog.000001
    #[arg(long = "binlog-file", conflicts_with = "binlog_base")]
    pub binlog_files: Vec<String>,

    /// Binlog base name; reads every file from --from-seq to --to-seq
    #[arg(long, requires_all = ["from_seq", "to_seq"])]
    pub binlog_base: Option<String>,

    #[arg(long)]
    pub from_seq: Option<u64>,

    #[arg(long)]
    pub to_seq: Option<u64>,

    #[arg(long, default_value_t = 4)]
    pub start_position: u64,

    #[arg(long, default_value_t = i64::MAX as u64)]
    pub stop_position: u64,

    /// Thread whose transactions are rolled back
    #[arg(long)]
    pub thread_id: String,

    /// JSON catalog: {"table": ["col1", "col2", ...]}
    #[arg(long)]
    pub catalog: PathBuf,

    /// JSON file overlaying the default RollbackConfig
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub mysqlbinlog: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long)]
    pub user: Option<String>,

    #[arg(long)]
    pub password: Option<String>,

    #[arg(long)]
    pub ssl_ca: Option<PathBuf>,

    #[arg(long)]
    pub ssl_cert: Option<PathBuf>,

    #[arg(long)]
    pub ssl_key: Option<PathBuf>,

    #[arg(long)]
    pub no_verify_checksum: bool,

    #[arg(long)]
    pub size_limit: Option<usize>,

    /// Write the script here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Config file (or defaults), then `ROLLBACK_*` variables, then flags.
pub fn resolve_config(args: &RunArgs) -> anyhow::Result<RollbackConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str::<RollbackConfig>(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
                .with_overrides(|key| std::env::var(key).ok())?
        }
        None => RollbackConfig::from_env()?,
    };

    let conn = &mut config.connection;
    if let Some(path) = &args.mysqlbinlog {
        config.mysqlbinlog_path = path.clone();
    }
    if let Some(host) = &args.host {
        conn.host = host.clone();
    }
    if args.port.is_some() {
        conn.port = args.port;
    }
    if let Some(user) = &args.user {
        conn.user = user.clone();
    }
    if args.password.is_some() {
        conn.password = args.password.clone();
    }
    if args.ssl_ca.is_some() {
        conn.tls.ssl_ca = args.ssl_ca.clone();
    }
    if args.ssl_cert.is_some() {
        conn.tls.ssl_cert = args.ssl_cert.clone();
    }
    if args.ssl_key.is_some() {
        conn.tls.ssl_key = args.ssl_key.clone();
    }
    if args.no_verify_checksum {
        config.verify_checksum = false;
    }
    if let Some(limit) = args.size_limit {
        config.size_limit_bytes = limit;
    }
    Ok(config)
}

/// Explicit files sorted by sequence, or the generated `base.NNNNNN` range.
pub fn resolve_files(args: &RunArgs) -> anyhow::Result<Vec<String>> {
    if !args.binlog_files.is_empty() {
        return Ok(sort_binlog_files(&args.binlog_files)?);
    }
    match (&args.binlog_base, args.from_seq, args.to_seq) {
        (Some(base), Some(from), Some(to)) => {
            if from > to {
                bail!("--from-seq {} is after --to-seq {}", from, to);
            }
            Ok(gen_binlog_file_names(base, from, to))
        }
        _ => bail!("pass --binlog-file, or --binlog-base with --from-seq and --to-seq"),
    }
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let request = RollbackRequest {
        binlog_files: resolve_files(&args)?,
        start_position: args.start_position,
        stop_position: args.stop_position,
        thread_id: args.thread_id.clone(),
    };
    let catalog = load_catalog(&args.catalog)?;
    tracing::debug!(?config, "Resolved configuration");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let script = runtime.block_on(async {
        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupted, cancelling");
                on_interrupt.cancel();
            }
        });
        generate_rollback_sql(&config, &request, &catalog, &cancel).await
    })?;

    write_script(&script, args.output.as_deref())
}

fn write_script(script: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, script)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{script}");
            Ok(())
        }
    }
}
