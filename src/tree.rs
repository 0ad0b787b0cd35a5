//! Ball tree construction.
//!
//! Space-partitioning tree over the rows of an [`ItemMatrix`]: every node is
//! a ball (center + radius) enclosing the vectors of all rows in its subtree.
//! Leaves own their row indices; internal nodes drop them once children
//! exist, keeping only the bounding geometry.
//!
//! Construction is a cheap randomized furthest-point split, approximating a
//! 2-means partition without iterative refinement:
//!
//! 1. pick a uniformly random row `x`
//! 2. `A` = row furthest from `x` (squared Euclidean, first maximum wins)
//! 3. `B` = row furthest from `A`
//! 4. every row goes left if it is at least as close to `A` as to `B`
//!
//! Splitting stops once a node owns `<= leaf_threshold` rows or sits at
//! `max_depth`. Both children are depth-limited identically.
//!
//! Nodes live in an arena indexed by [`NodeId`]; parent and child links are
//! plain indices, so attachment is a single assignment and the tree needs no
//! interior mutability or reference counting.
//!
//! # References
//!
//! - Omohundro (1989): "Five balltree construction algorithms"
//! - Ram & Gray (2012): "Maximum Inner-Product Search using Cone Trees"

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::math::{distance_squared, dot, norm};
use crate::matrix::ItemMatrix;
use crate::{MipsError, Result};

/// Index of a ball in the tree's arena.
pub type NodeId = usize;

/// Construction parameters.
#[derive(Clone, Debug)]
pub struct BallTreeParams {
    /// Nodes with at most this many rows become leaves. Must be positive.
    pub leaf_threshold: usize,

    /// Maximum recursion depth; the root sits at depth 0, so nodes at this
    /// depth are forced leaves regardless of size.
    pub max_depth: usize,

    /// Seed for the split heuristic's random pivot. `None` draws a fresh
    /// seed, making tree shape non-reproducible across builds.
    pub seed: Option<u64>,
}

impl Default for BallTreeParams {
    fn default() -> Self {
        Self {
            leaf_threshold: 20,
            max_depth: 32,
            seed: None,
        }
    }
}

impl BallTreeParams {
    /// Configure a deterministic seed for the split heuristic.
    ///
    /// When set, repeated builds over the same matrix produce identical
    /// trees and therefore identical search results.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One node of the tree: a bounding ball plus either owned rows (leaf) or
/// two children (internal). The leaf/internal distinction is a tagged enum,
/// never a nullable row list.
#[derive(Debug)]
pub(crate) struct Ball {
    pub(crate) center: Vec<f64>,
    pub(crate) radius: f64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: BallKind,
}

#[derive(Debug)]
pub(crate) enum BallKind {
    Leaf { rows: Vec<usize> },
    Internal { left: NodeId, right: NodeId },
}

/// Read-only view of one ball, for introspection and invariant checking.
#[derive(Debug, Clone, Copy)]
pub struct BallView<'t> {
    /// Mean of the vectors of all rows in this ball's subtree.
    pub center: &'t [f64],
    /// Max Euclidean distance from `center` to any such vector.
    pub radius: f64,
    /// Owning node, `None` at the root.
    pub parent: Option<NodeId>,
    /// `(left, right)` for internal nodes, `None` for leaves.
    pub children: Option<(NodeId, NodeId)>,
    /// Owned row indices; present only on leaves.
    pub rows: Option<&'t [usize]>,
}

impl BallView<'_> {
    /// Leaf iff it owns rows (equivalently, has no children).
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Upper bound on `dot(q, x)` for every vector `x` inside this ball.
    ///
    /// `dot(q, center) + radius * norm(q)`, from Cauchy-Schwarz applied to
    /// `x - center`. Safe for pruning; tight only when a boundary point of
    /// the ball is colinear with `q` from the center.
    #[must_use]
    pub fn mip_bound(&self, q: &[f64]) -> f64 {
        dot(q, self.center) + self.radius * norm(q)
    }

    /// Upper bound on `dot(x, y)` for any `x` in this ball and `y` in
    /// `other`: `dot(c1, c2) + r1*r2 + r2*|c1| + r1*|c2|`.
    ///
    /// Extension point for dual-tree (ball-vs-ball) search; unused by the
    /// single-tree search in [`crate::search`].
    #[must_use]
    pub fn pair_bound(&self, other: &BallView<'_>) -> f64 {
        dot(self.center, other.center)
            + self.radius * other.radius
            + other.radius * norm(self.center)
            + self.radius * norm(other.center)
    }
}

/// Ball tree over an [`ItemMatrix`], immutable once built.
///
/// Borrows the matrix for its whole lifetime; nodes store row indices only.
#[derive(Debug)]
pub struct BallTree<'a> {
    items: &'a ItemMatrix,
    nodes: Vec<Ball>,
    root: NodeId,
}

impl<'a> BallTree<'a> {
    /// Build a tree over all rows of `items`.
    ///
    /// # Errors
    ///
    /// [`MipsError::InvalidParameter`] when `params.leaf_threshold` is zero.
    pub fn build(items: &'a ItemMatrix, params: &BallTreeParams) -> Result<Self> {
        if params.leaf_threshold == 0 {
            return Err(MipsError::InvalidParameter(
                "leaf_threshold must be positive".to_string(),
            ));
        }

        let seed = params.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);

        let rows: Vec<usize> = (0..items.num_rows()).collect();
        let mut tree = Self {
            items,
            nodes: Vec::new(),
            root: 0,
        };
        tree.root = tree.build_node(rows, None, 0, params, &mut rng)?;
        Ok(tree)
    }

    /// The matrix this tree indexes.
    #[must_use]
    pub fn items(&self) -> &'a ItemMatrix {
        self.items
    }

    /// Arena index of the root ball.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total number of balls in the tree.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the tree; a single-leaf tree has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth_of(self.root)
    }

    fn depth_of(&self, id: NodeId) -> usize {
        match self.nodes[id].kind {
            BallKind::Leaf { .. } => 1,
            BallKind::Internal { left, right } => {
                1 + self.depth_of(left).max(self.depth_of(right))
            }
        }
    }

    /// View of the ball at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id >= num_nodes()`.
    #[must_use]
    pub fn ball(&self, id: NodeId) -> BallView<'_> {
        let node = &self.nodes[id];
        let (children, rows) = match &node.kind {
            BallKind::Leaf { rows } => (None, Some(rows.as_slice())),
            BallKind::Internal { left, right } => (Some((*left, *right)), None),
        };
        BallView {
            center: &node.center,
            radius: node.radius,
            parent: node.parent,
            children,
            rows,
        }
    }

    /// Iterate over all balls in arena order (root first).
    pub fn balls(&self) -> impl Iterator<Item = BallView<'_>> + '_ {
        (0..self.nodes.len()).map(|id| self.ball(id))
    }

    /// All rows under the ball at `id`, collected from its subtree's leaves.
    #[must_use]
    pub fn subtree_rows(&self, id: NodeId) -> Vec<usize> {
        let mut rows = Vec::new();
        self.collect_rows(id, &mut rows);
        rows
    }

    fn collect_rows(&self, id: NodeId, out: &mut Vec<usize>) {
        match &self.nodes[id].kind {
            BallKind::Leaf { rows } => out.extend_from_slice(rows),
            BallKind::Internal { left, right } => {
                self.collect_rows(*left, out);
                self.collect_rows(*right, out);
            }
        }
    }

    fn build_node(
        &mut self,
        rows: Vec<usize>,
        parent: Option<NodeId>,
        depth: usize,
        params: &BallTreeParams,
        rng: &mut StdRng,
    ) -> Result<NodeId> {
        if rows.is_empty() {
            return Err(MipsError::EmptyRowSet);
        }

        let (center, radius) = self.bounding_ball(&rows);

        let id = self.nodes.len();
        self.nodes.push(Ball {
            center,
            radius,
            parent,
            kind: BallKind::Leaf { rows: Vec::new() },
        });

        if rows.len() > params.leaf_threshold && depth < params.max_depth {
            let (left_rows, right_rows) = self.split_rows(&rows, rng);
            if !left_rows.is_empty() && !right_rows.is_empty() {
                // parent's rows drop here; internal nodes keep geometry only
                drop(rows);
                let left = self.build_node(left_rows, Some(id), depth + 1, params, rng)?;
                let right = self.build_node(right_rows, Some(id), depth + 1, params, rng)?;
                self.nodes[id].kind = BallKind::Internal { left, right };
                return Ok(id);
            }
            // Degenerate split: all rows coincide, so A == B and every row
            // tied to the left. Keep the node as a leaf.
        }

        self.nodes[id].kind = BallKind::Leaf { rows };
        Ok(id)
    }

    /// Mean center and true max-distance radius over `rows`.
    fn bounding_ball(&self, rows: &[usize]) -> (Vec<f64>, f64) {
        let mut center = vec![0.0; self.items.dim()];
        for &row in rows {
            for (c, v) in center.iter_mut().zip(self.items.row(row)) {
                *c += v;
            }
        }
        let k = rows.len() as f64;
        for c in &mut center {
            *c /= k;
        }

        let mut radius_sq: f64 = 0.0;
        for &row in rows {
            radius_sq = radius_sq.max(distance_squared(&center, self.items.row(row)));
        }

        (center, radius_sq.sqrt())
    }

    /// Furthest-point split of `rows` into (left, right).
    fn split_rows(&self, rows: &[usize], rng: &mut StdRng) -> (Vec<usize>, Vec<usize>) {
        let x = rows[rng.random_range(0..rows.len())];
        let a = self.furthest_from(x, rows);
        let b = self.furthest_from(a, rows);

        let va = self.items.row(a);
        let vb = self.items.row(b);

        let mut left = Vec::new();
        let mut right = Vec::new();
        for &row in rows {
            let y = self.items.row(row);
            if distance_squared(va, y) <= distance_squared(vb, y) {
                left.push(row);
            } else {
                right.push(row);
            }
        }
        (left, right)
    }

    /// Row in `rows` maximizing squared distance to `from`; the first
    /// maximum encountered wins, and `from` itself wins when all distances
    /// are zero.
    fn furthest_from(&self, from: usize, rows: &[usize]) -> usize {
        let origin = self.items.row(from);
        let mut best = from;
        let mut best_dist = 0.0;
        for &row in rows {
            let d = distance_squared(origin, self.items.row(row));
            if d > best_dist {
                best = row;
                best_dist = d;
            }
        }
        best
    }
}
