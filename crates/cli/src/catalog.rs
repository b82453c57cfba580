// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Catalog files: a JSON object mapping each table name to its column names
//! in definition order, e.g. `{"user": ["id", "name", "balance"]}`.

use anyhow::{bail, Context};
use binlog_rollback::Catalog;
use std::path::Path;

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let catalog: Catalog = serde_json::from_str(&text)
        .with_context(|| format!("catalog {} is not a table -> columns JSON object", path.display()))?;

    if let Some((table, _)) = catalog.iter().find(|(_, columns)| columns.is_empty()) {
        bail!("catalog {} lists no columns for table {:?}", path.display(), table);
    }
    Ok(catalog)
}
