// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use anyhow::Context;
use std::path::Path;

use crate::catalog::load_catalog;

/// Writes the rollback script for `thread_id`'s transactions in `dump` to
/// `output`, or stdout when absent.
pub fn run(
    dump: &Path,
    thread_id: &str,
    catalog_path: &Path,
    size_limit: usize,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let txns = super::parse_dump(dump, thread_id, size_limit)?;
    let script = binlog_rollback::rollback_script(&txns, &catalog)
        .context("failed to synthesize rollback script")?;

    if txns.is_empty() {
        tracing::warn!("No transactions of thread {} found in {}", thread_id, dump.display());
    }

    match output {
        Some(path) => {
            std::fs::write(path, &script)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Wrote rollback for {} transaction(s) to {}", txns.len(), path.display());
        }
        None => println!("{script}"),
    }
    Ok(())
}
