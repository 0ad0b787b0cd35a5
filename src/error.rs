//! Error types for matrix construction and search.

use thiserror::Error;

/// Errors that can occur building an item matrix or running a search.
///
/// The domain is pure in-memory computation, so every variant is a contract
/// violation on the inputs rather than a runtime fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MipsError {
    /// Item matrix has no rows.
    #[error("item matrix has no rows")]
    EmptyMatrix,

    /// Item matrix has zero columns.
    #[error("item matrix has zero columns")]
    ZeroDimension,

    /// A row's length disagrees with the matrix dimensionality.
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Query dimensionality disagrees with the item matrix.
    #[error("dimension mismatch: query has {query_dim} dimensions, items have {item_dim}")]
    DimensionMismatch { query_dim: usize, item_dim: usize },

    /// A ball was asked to enclose an empty row set.
    #[error("ball construction over an empty row set")]
    EmptyRowSet,

    /// Invalid construction parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, MipsError>;
