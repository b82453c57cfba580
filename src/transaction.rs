// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transactions and the Transaction Grouper
//!
//! Folds the tokenizer's event sequence into transactions delimited by a
//! leading `Query` event and a trailing `Xid` event, keeping only those
//! executed by the target thread.
//!
//! # State Machine
//! - `Idle` + any event            => `Open` with that event
//! - `Open` + `Query` (head Query)  => head replaced, nothing appended
//! - `Open` + `Xid`                 => appended, filtered, back to `Idle`
//! - `Open` + row event             => appended
//! - end of stream while `Open`     => filtered as if closed
//!
//! The source tool emits a `Query` event for every statement boundary, including
//! non-transactional ones such as session variable assignments. Replacing the
//! head keeps only the `Query` that is actually followed by its `Xid`.

use crate::error::{ParseError, ParseResult, RollbackResult};
use crate::event::{Event, EventKind};
use crate::rollback::{synthesize_rollback, Catalog};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static THREAD_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"thread_id=(\d+)").expect("valid thread_id pattern"));

/// Ordered events of one transaction, in the order they were applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transaction {
    events: Vec<Event>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn first(&self) -> Option<&Event> {
        self.events.first()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// True once the trailing `Xid` has been appended.
    pub fn is_closed(&self) -> bool {
        self.last().is_some_and(|e| e.kind == EventKind::Xid)
    }

    fn starts_with_query(&self) -> bool {
        self.first().is_some_and(|e| e.kind == EventKind::Query)
    }

    /// Thread identifier from the leading `Query` header.
    ///
    /// `Ok(None)` for an empty transaction.
    pub fn thread_id(&self) -> ParseResult<Option<&str>> {
        let Some(first) = self.first() else {
            return Ok(None);
        };
        if first.kind != EventKind::Query {
            return Err(ParseError::InvalidTransactionShape { first: first.kind });
        }
        extract_thread_id(&first.header)
            .map(Some)
            .ok_or_else(|| ParseError::ThreadIdNotFound {
                header: first.header.clone(),
            })
    }

    /// See [`matches_thread_id`].
    pub fn matches_thread(&self, target_thread_id: &str) -> ParseResult<bool> {
        matches_thread_id(self, target_thread_id)
    }

    /// See [`synthesize_rollback`].
    pub fn rollback_sql(&self, catalog: &Catalog) -> RollbackResult<String> {
        synthesize_rollback(self, catalog)
    }
}

impl From<Vec<Event>> for Transaction {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}

fn extract_thread_id(header: &str) -> Option<&str> {
    THREAD_ID
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Thread Filter.
///
/// Identifiers are compared as opaque strings, never as integers.
pub fn matches_thread_id(txn: &Transaction, target_thread_id: &str) -> ParseResult<bool> {
    Ok(txn.thread_id()? == Some(target_thread_id))
}

enum GroupState {
    Idle,
    Open(Transaction),
}

/// Transaction Grouper; feed it events with [`push`](Self::push), then [`finish`](Self::finish).
pub struct TransactionGrouper {
    thread_id: String,
    state: GroupState,
    matched: Vec<Transaction>,
}

impl TransactionGrouper {
    pub fn new(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: thread_id.into(),
            state: GroupState::Idle,
            matched: Vec::new(),
        }
    }

    pub fn push(&mut self, event: Event) -> ParseResult<()> {
        let state = std::mem::replace(&mut self.state, GroupState::Idle);

        self.state = match (state, event.kind) {
            (state, EventKind::Unknown) => {
                tracing::trace!("ignoring unknown event");
                state
            }
            // An Xid always closes, even one with no opening Query in the window.
            (GroupState::Idle, EventKind::Xid) => {
                self.close(Transaction::from(vec![event]))?;
                GroupState::Idle
            }
            (GroupState::Idle, _) => GroupState::Open(Transaction::from(vec![event])),
            (GroupState::Open(mut txn), EventKind::Query) if txn.starts_with_query() => {
                txn.events[0] = event;
                GroupState::Open(txn)
            }
            (GroupState::Open(mut txn), EventKind::Xid) => {
                txn.push(event);
                self.close(txn)?;
                GroupState::Idle
            }
            (GroupState::Open(mut txn), _) => {
                txn.push(event);
                GroupState::Open(txn)
            }
        };
        Ok(())
    }

    /// Flushes a still-open transaction through the filter and returns the matches.
    pub fn finish(mut self) -> ParseResult<Vec<Transaction>> {
        if let GroupState::Open(txn) = std::mem::replace(&mut self.state, GroupState::Idle) {
            tracing::debug!(events = txn.len(), "closing transaction truncated by end of stream");
            self.close(txn)?;
        }
        Ok(self.matched)
    }

    fn close(&mut self, txn: Transaction) -> ParseResult<()> {
        if matches_thread_id(&txn, &self.thread_id)? {
            tracing::debug!(
                thread_id = %self.thread_id,
                events = txn.len(),
                position = ?txn.last().and_then(Event::position),
                "matched transaction"
            );
            self.matched.push(txn);
        }
        Ok(())
    }
}
