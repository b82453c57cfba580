// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use crate::event::EventKind;
use thiserror::Error;

/// Failures of the tokenizing / grouping pass.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Byte values are never substituted; the row image would restore different data.
    #[error("Invalid UTF-8 in binlog output at byte {offset}")]
    InvalidEncoding { offset: u64 },

    #[error("Binlog parsing cancelled")]
    Cancelled,

    /// Retryable with a larger limit; the input itself is not corrupt.
    #[error("Binlog event bodies exceed the size limit of {limit} bytes")]
    SizeLimitExceeded { limit: usize },

    #[error("Invalid transaction: first event is {first}, expected Query")]
    InvalidTransactionShape { first: EventKind },

    #[error("Thread id not found in event header: {header:?}")]
    ThreadIdNotFound { header: String },
}

impl ParseError {
    pub fn is_size_limit_exceeded(&self) -> bool {
        matches!(self, ParseError::SizeLimitExceeded { .. })
    }
}

/// Failures of rollback synthesis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RollbackError {
    #[error("No `schema`.`table` name found in row event body")]
    TableNotFoundInBody,

    #[error("Table {table:?} is not in the catalog")]
    TableNotInCatalog { table: String },

    #[error("Catalog for table {table:?} has {columns} columns but the row image has {values} values")]
    CatalogColumnCountMismatch {
        table: String,
        columns: usize,
        values: usize,
    },

    #[error("Cannot synthesize rollback for a {kind} event")]
    InvalidEventKind { kind: EventKind },

    #[error("Malformed row image line: {line:?}")]
    MalformedRowImage { line: String },
}

pub type ParseResult<T> = core::result::Result<T, ParseError>;
pub type RollbackResult<T> = core::result::Result<T, RollbackError>;
