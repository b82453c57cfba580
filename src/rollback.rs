// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Rollback Synthesizer
//!
//! Inverts the row events of one transaction into SQL that undoes them.
//!
//! | Event        | Rollback | Statement swap             | Sections      |
//! |--------------|----------|----------------------------|---------------|
//! | `WriteRows`  | DELETE   | `INSERT INTO`→`DELETE FROM` | SET→WHERE     |
//! | `DeleteRows` | INSERT   | `DELETE FROM`→`INSERT INTO` | WHERE→SET     |
//! | `UpdateRows` | UPDATE   | none                        | WHERE↔SET     |
//!
//! WHERE columns use the NULL-safe `<=>` joined by ` AND`; SET columns use `=`
//! joined by `,`. The last column line of every row image ends with `;`.
//!
//! # Invariants
//! - Events are undone newest first; row images inside one event keep their order
//! - Every positional value resolves to a catalog column, and every section
//!   carries exactly as many values as the catalog has columns
//! - Pure: no I/O, no shared state

use crate::config::ROW_COMMENT_MARKER;
use crate::error::{RollbackError, RollbackResult};
use crate::event::{Event, EventKind};
use crate::transaction::Transaction;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Table name to its column names, in table definition order.
pub type Catalog = HashMap<String, Vec<String>>;

static TABLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]*)`\.`([^`]*)`").expect("valid table name pattern"));

static VALUE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*@(\d+)=(.*)$").expect("valid positional value pattern"));

/// Synthesizes the rollback script of `txn`.
///
/// `Query` and `Xid` events are skipped; an empty transaction yields an empty script.
pub fn synthesize_rollback(txn: &Transaction, catalog: &Catalog) -> RollbackResult<String> {
    let mut statements = Vec::new();

    for event in txn.events().iter().rev() {
        if matches!(event.kind, EventKind::Query | EventKind::Xid) {
            continue;
        }
        let sql = rollback_event(event, catalog)?;
        if !sql.is_empty() {
            statements.push(sql);
        }
    }

    Ok(statements.join("\n\n"))
}

/// Script undoing every transaction in `txns`, latest transaction first.
pub fn rollback_script(txns: &[Transaction], catalog: &Catalog) -> RollbackResult<String> {
    let mut scripts = Vec::with_capacity(txns.len());
    for txn in txns.iter().rev() {
        let sql = synthesize_rollback(txn, catalog)?;
        if !sql.is_empty() {
            scripts.push(sql);
        }
    }
    Ok(scripts.join("\n\n"))
}

/// Rollback SQL of a single row event, one statement per row image.
pub fn rollback_event(event: &Event, catalog: &Catalog) -> RollbackResult<String> {
    let rewrite = Rewrite::for_kind(event.kind)?;

    // Placeholder row events without rows are legal.
    if event.body.trim().is_empty() {
        return Ok(String::new());
    }

    let table = table_name(&event.body)?;
    let columns = catalog
        .get(table)
        .ok_or_else(|| RollbackError::TableNotInCatalog {
            table: table.to_string(),
        })?;

    let lines = event
        .body
        .lines()
        .map(strip_comment_marker)
        .filter(|line| !line.trim().is_empty())
        .map(|line| BodyLine::classify(line, rewrite.source))
        .collect::<RollbackResult<Vec<_>>>()?;

    let statements = split_row_images(&lines)?
        .into_iter()
        .map(|image| rewrite.apply(image, table, columns))
        .collect::<RollbackResult<Vec<_>>>()?;

    Ok(statements.join("\n\n"))
}

fn table_name(body: &str) -> RollbackResult<&str> {
    TABLE_NAME
        .captures(body)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str())
        .ok_or(RollbackError::TableNotFoundInBody)
}

fn strip_comment_marker(line: &str) -> &str {
    match line.strip_prefix(ROW_COMMENT_MARKER) {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => line,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Where,
    Set,
}

impl Section {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "WHERE" => Some(Section::Where),
            "SET" => Some(Section::Set),
            _ => None,
        }
    }

    fn swapped(self) -> Self {
        match self {
            Section::Where => Section::Set,
            Section::Set => Section::Where,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Section::Where => "WHERE",
            Section::Set => "SET",
        }
    }

    fn operator(self) -> &'static str {
        match self {
            Section::Where => "<=>",
            Section::Set => "=",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Section::Where => " AND",
            Section::Set => ",",
        }
    }
}

/// One decoded body line after the comment marker is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BodyLine<'a> {
    /// `INSERT INTO <table>` and friends; holds the text after the keyword.
    Statement(&'a str),
    Section(Section),
    Value { index: usize, value: &'a str },
    /// Passed through verbatim.
    Other(&'a str),
}

impl<'a> BodyLine<'a> {
    fn classify(line: &'a str, statement: &str) -> RollbackResult<Self> {
        if let Some(rest) = line.strip_prefix(statement) {
            if rest.is_empty() || rest.starts_with(' ') {
                return Ok(BodyLine::Statement(rest));
            }
        }
        if let Some(section) = Section::parse(line) {
            return Ok(BodyLine::Section(section));
        }
        if let Some(caps) = VALUE_LINE.captures(line) {
            if let (Some(index), Some(value)) = (caps.get(1), caps.get(2)) {
                let index = index
                    .as_str()
                    .parse()
                    .map_err(|_| RollbackError::MalformedRowImage { line: line.to_string() })?;
                return Ok(BodyLine::Value {
                    index,
                    value: value.as_str(),
                });
            }
        }
        Ok(BodyLine::Other(line))
    }
}

/// Splits the lines into row images, each starting at a statement line.
fn split_row_images<'l, 'a>(lines: &'l [BodyLine<'a>]) -> RollbackResult<Vec<&'l [BodyLine<'a>]>> {
    let mut starts = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        match line {
            BodyLine::Statement(_) => starts.push(i),
            _ if starts.is_empty() => {
                return Err(RollbackError::MalformedRowImage {
                    line: format!("{line:?}"),
                })
            }
            _ => {}
        }
    }

    let images = starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(lines.len());
            &lines[start..end]
        })
        .collect();
    Ok(images)
}

/// Kind-specific structural rewrite.
#[derive(Clone, Copy, Debug)]
struct Rewrite {
    source: &'static str,
    target: &'static str,
}

impl Rewrite {
    fn for_kind(kind: EventKind) -> RollbackResult<Self> {
        let (source, target) = match kind {
            EventKind::WriteRows => ("INSERT INTO", "DELETE FROM"),
            EventKind::DeleteRows => ("DELETE FROM", "INSERT INTO"),
            EventKind::UpdateRows => ("UPDATE", "UPDATE"),
            _ => return Err(RollbackError::InvalidEventKind { kind }),
        };
        Ok(Self { source, target })
    }

    fn apply(&self, image: &[BodyLine<'_>], table: &str, columns: &[String]) -> RollbackResult<String> {
        let last_value = image
            .iter()
            .rposition(|line| matches!(line, BodyLine::Value { .. }));

        let mut out = Vec::with_capacity(image.len());
        let mut section: Option<Section> = None;
        let mut section_values = 0usize;

        for (i, line) in image.iter().enumerate() {
            match *line {
                BodyLine::Statement(rest) => out.push(format!("{}{}", self.target, rest)),
                BodyLine::Section(original) => {
                    check_value_count(section, section_values, table, columns)?;
                    let renamed = original.swapped();
                    out.push(renamed.keyword().to_string());
                    section = Some(renamed);
                    section_values = 0;
                }
                BodyLine::Value { index, value } => {
                    let current = section.ok_or_else(|| RollbackError::MalformedRowImage {
                        line: format!("@{index}={value}"),
                    })?;
                    let column = column_at(columns, index, table)?;
                    section_values += 1;

                    let suffix = if Some(i) == last_value {
                        ";"
                    } else if ends_section(&image[i + 1..]) {
                        ""
                    } else {
                        current.separator()
                    };
                    out.push(format!("  `{column}`{}{value}{suffix}", current.operator()));
                }
                BodyLine::Other(text) => out.push(text.to_string()),
            }
        }
        check_value_count(section, section_values, table, columns)?;

        Ok(out.join("\n"))
    }
}

fn ends_section(rest: &[BodyLine<'_>]) -> bool {
    !matches!(
        rest.iter()
            .find(|line| matches!(line, BodyLine::Value { .. } | BodyLine::Section(_))),
        Some(BodyLine::Value { .. })
    )
}

fn column_at<'c>(columns: &'c [String], index: usize, table: &str) -> RollbackResult<&'c str> {
    index
        .checked_sub(1)
        .and_then(|i| columns.get(i))
        .map(String::as_str)
        .ok_or_else(|| RollbackError::CatalogColumnCountMismatch {
            table: table.to_string(),
            columns: columns.len(),
            values: index,
        })
}

fn check_value_count(
    section: Option<Section>,
    values: usize,
    table: &str,
    columns: &[String],
) -> RollbackResult<()> {
    if section.is_some() && values != columns.len() {
        return Err(RollbackError::CatalogColumnCountMismatch {
            table: table.to_string(),
            columns: columns.len(),
            values,
        });
    }
    Ok(())
}
