//! Top-N inner-product search: exhaustive baseline and branch-and-bound.
//!
//! [`linear`] scans every row and is the correctness reference.
//! [`single_tree`] walks a [`BallTree`], pruning any subtree whose
//! [`crate::BallView::mip_bound`] cannot beat the worst result already retained,
//! and runs the linear primitive over leaf rows. Both return identical
//! top-N sets for the same inputs.
//!
//! All searches are read-only over the tree and matrix; each call owns its
//! collector, so concurrent searches need no synchronization.

use std::collections::HashSet;

use crate::math::{dot, norm};
use crate::matrix::ItemMatrix;
use crate::topn::TopN;
use crate::tree::{BallTree, NodeId};
use crate::{MipsError, Result};

/// Exhaustive top-`n` search over all rows of `items`.
///
/// # Errors
///
/// [`MipsError::DimensionMismatch`] when `q.len() != items.dim()`.
pub fn linear(items: &ItemMatrix, q: &[f64], n: usize) -> Result<Vec<(usize, f64)>> {
    linear_excluding(items, q, n, &HashSet::new())
}

/// Exhaustive top-`n` search skipping rows in `excluded`.
///
/// Returns `(row, score)` pairs in descending score order, ties broken by
/// ascending row index. An exclusion set covering every row yields an empty
/// result, as does `n == 0`.
///
/// # Errors
///
/// [`MipsError::DimensionMismatch`] when `q.len() != items.dim()`.
pub fn linear_excluding(
    items: &ItemMatrix,
    q: &[f64],
    n: usize,
    excluded: &HashSet<usize>,
) -> Result<Vec<(usize, f64)>> {
    check_query(items, q)?;
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut topn = TopN::new(n);
    for row in 0..items.num_rows() {
        if !excluded.contains(&row) {
            topn.add(row, dot(q, items.row(row)));
        }
    }
    Ok(topn.into_sorted_vec())
}

/// Branch-and-bound top-`n` search over a built [`BallTree`].
///
/// # Errors
///
/// [`MipsError::DimensionMismatch`] when `q.len()` differs from the indexed
/// matrix's dimensionality.
pub fn single_tree(tree: &BallTree<'_>, q: &[f64], n: usize) -> Result<Vec<(usize, f64)>> {
    single_tree_excluding(tree, q, n, &HashSet::new())
}

/// Branch-and-bound top-`n` search skipping rows in `excluded`.
///
/// Result ordering and edge cases match [`linear_excluding`]; the retained
/// set is the same, though when several rows tie at the cut-off score the
/// tied row kept may differ (tie retention follows visit order, which the
/// tree shape determines).
///
/// # Errors
///
/// [`MipsError::DimensionMismatch`] when `q.len()` differs from the indexed
/// matrix's dimensionality.
pub fn single_tree_excluding(
    tree: &BallTree<'_>,
    q: &[f64],
    n: usize,
    excluded: &HashSet<usize>,
) -> Result<Vec<(usize, f64)>> {
    check_query(tree.items(), q)?;
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut topn = TopN::new(n);
    let q_norm = norm(q);
    descend(tree, tree.root(), q, q_norm, excluded, &mut topn);
    Ok(topn.into_sorted_vec())
}

fn descend(
    tree: &BallTree<'_>,
    id: NodeId,
    q: &[f64],
    q_norm: f64,
    excluded: &HashSet<usize>,
    topn: &mut TopN,
) {
    let ball = tree.ball(id);
    let bound = mip_bound(tree, id, q, q_norm);

    // No point under this ball can beat the worst retained result. The test
    // requires a full collector: with free capacity, low-scoring rows still
    // belong in the top-N.
    if topn.is_full() {
        if let Some((_, worst)) = topn.peek() {
            if worst > bound {
                return;
            }
        }
    }

    match ball.children {
        None => {
            if let Some(rows) = ball.rows {
                scan_rows(tree.items(), rows, q, excluded, topn);
            }
        }
        Some((left, right)) => {
            let left_bound = mip_bound(tree, left, q, q_norm);
            let right_bound = mip_bound(tree, right, q, q_norm);
            // More promising child first: it tightens the pruning threshold
            // before the other subtree is considered. Ties go left.
            if left_bound >= right_bound {
                descend(tree, left, q, q_norm, excluded, topn);
                descend(tree, right, q, q_norm, excluded, topn);
            } else {
                descend(tree, right, q, q_norm, excluded, topn);
                descend(tree, left, q, q_norm, excluded, topn);
            }
        }
    }
}

/// [`crate::BallView::mip_bound`] with the query norm hoisted out of the
/// recursion.
fn mip_bound(tree: &BallTree<'_>, id: NodeId, q: &[f64], q_norm: f64) -> f64 {
    let ball = tree.ball(id);
    dot(q, ball.center) + ball.radius * q_norm
}

/// Leaf-level primitive: offer every non-excluded row to the collector.
fn scan_rows(
    items: &ItemMatrix,
    rows: &[usize],
    q: &[f64],
    excluded: &HashSet<usize>,
    topn: &mut TopN,
) {
    for &row in rows {
        if !excluded.contains(&row) {
            topn.add(row, dot(q, items.row(row)));
        }
    }
}

fn check_query(items: &ItemMatrix, q: &[f64]) -> Result<()> {
    if q.len() != items.dim() {
        return Err(MipsError::DimensionMismatch {
            query_dim: q.len(),
            item_dim: items.dim(),
        });
    }
    Ok(())
}
