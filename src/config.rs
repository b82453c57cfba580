// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Default ceiling for the accumulated event body text of one parse call (8 MiB).
pub const DEFAULT_SIZE_LIMIT: usize = 8 * 1024 * 1024;

/// Prefix of the line that opens every event in `mysqlbinlog` output.
pub const EVENT_BOUNDARY_PREFIX: &str = "# at ";

/// Substring identifying an event header line.
pub const HEADER_MARKER: &str = "server id";

/// Line-comment marker in front of every decoded row line.
pub const ROW_COMMENT_MARKER: &str = "###";

/// Longest header or boundary line kept while the body budget is nearly spent.
pub const MAX_HEADER_LINE_BYTES: usize = 64 * 1024;
