// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Binlog Events
//!
//! The typed form of one event block of `mysqlbinlog -v` text output.
//!
//! # Invariants
//! - `header` is the single line that announced the event, newline included
//! - `body` is the verbatim text between the header and the next boundary
//! - Only the kinds below ever leave the tokenizer; `Unknown` is dropped there

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static END_LOG_POS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"end_log_pos (\d+)").expect("valid end_log_pos pattern"));

/// Event kinds the rollback pipeline distinguishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// Table maps, GTID blocks, format banners and everything else.
    #[default]
    Unknown,
    WriteRows,
    UpdateRows,
    DeleteRows,
    Query,
    Xid,
}

impl EventKind {
    /// Classifies a header line by substring, first match wins.
    ///
    /// The order matters: DDL headers carry both `Query` and `Xid = N`.
    pub fn from_header(header: &str) -> Self {
        const RULES: [(&str, EventKind); 5] = [
            ("Query", EventKind::Query),
            ("Xid", EventKind::Xid),
            ("Write_rows", EventKind::WriteRows),
            ("Update_rows", EventKind::UpdateRows),
            ("Delete_rows", EventKind::DeleteRows),
        ];

        RULES
            .iter()
            .find(|(needle, _)| header.contains(needle))
            .map(|(_, kind)| *kind)
            .unwrap_or(EventKind::Unknown)
    }

    pub fn is_row_mutation(self) -> bool {
        matches!(
            self,
            EventKind::WriteRows | EventKind::UpdateRows | EventKind::DeleteRows
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Unknown => "Unknown",
            EventKind::WriteRows => "WriteRows",
            EventKind::UpdateRows => "UpdateRows",
            EventKind::DeleteRows => "DeleteRows",
            EventKind::Query => "Query",
            EventKind::Xid => "Xid",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified event: its announcing header line and accumulated body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Event {
    pub kind: EventKind,
    pub header: String,
    pub body: String,
}

impl Event {
    pub fn new(kind: EventKind, header: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            header: header.into(),
            body: body.into(),
        }
    }

    /// `end_log_pos` from the header, if present.
    pub fn position(&self) -> Option<u64> {
        END_LOG_POS
            .captures(&self.header)
            .and_then(|caps| caps[1].parse().ok())
    }
}
