//! The static item matrix searched against.

use crate::{MipsError, Result};

/// Immutable matrix of item vectors, rows = items, columns = dimensions.
///
/// Storage is flat row-major `f64`, so `row(i)` is a contiguous slice and
/// nothing is ever copied per-row. The matrix is the single source of truth
/// for item vectors: a [`crate::BallTree`] borrows it and stores only row
/// indices, never the vectors themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemMatrix {
    data: Vec<f64>,
    num_rows: usize,
    dim: usize,
}

impl ItemMatrix {
    /// Build a matrix from per-row vectors.
    ///
    /// # Errors
    ///
    /// [`MipsError::EmptyMatrix`] when `rows` is empty,
    /// [`MipsError::ZeroDimension`] when the first row is empty, and
    /// [`MipsError::RaggedRow`] when a later row's length differs from the
    /// first row's.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(MipsError::EmptyMatrix);
        }
        let dim = rows[0].len();
        if dim == 0 {
            return Err(MipsError::ZeroDimension);
        }

        let mut data = Vec::with_capacity(rows.len() * dim);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(MipsError::RaggedRow {
                    row: i,
                    expected: dim,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            data,
            num_rows: rows.len(),
            dim,
        })
    }

    /// Build a matrix from flat row-major storage.
    ///
    /// # Errors
    ///
    /// [`MipsError::ZeroDimension`] when `dim` is zero,
    /// [`MipsError::EmptyMatrix`] when `data` is empty, and
    /// [`MipsError::RaggedRow`] when `data.len()` is not a multiple of `dim`.
    pub fn from_flat(data: Vec<f64>, dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(MipsError::ZeroDimension);
        }
        if data.is_empty() {
            return Err(MipsError::EmptyMatrix);
        }
        if data.len() % dim != 0 {
            return Err(MipsError::RaggedRow {
                row: data.len() / dim,
                expected: dim,
                actual: data.len() % dim,
            });
        }

        let num_rows = data.len() / dim;
        Ok(Self {
            data,
            num_rows,
            dim,
        })
    }

    /// Number of item rows.
    #[inline]
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Dimensionality of every row.
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The item vector at `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows()`.
    #[inline]
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.dim;
        &self.data[start..start + self.dim]
    }
}
