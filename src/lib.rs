//! mipsearch: exact Maximum Inner-Product Search (MIPS) with ball trees.
//!
//! Given a fixed matrix of item vectors and a query vector, find the top-N
//! items maximizing the dot product with the query, pruning whole subtrees
//! instead of scanning every item when the geometry allows it.
//!
//! Components:
//!
//! - [`matrix::ItemMatrix`]: the static item vectors, row-major `f64` storage.
//! - [`tree::BallTree`]: a spatial index built once over the matrix; each node
//!   is a ball (center + radius) enclosing the rows of its subtree.
//! - [`search`]: a branch-and-bound top-N search over the tree, plus an
//!   exhaustive linear baseline that doubles as the leaf-level primitive.
//! - [`topn::TopN`]: the bounded top-N collector both searches accumulate into.
//!
//! # Why inner product is different
//!
//! Inner product is not a metric: an item far from the query in Euclidean
//! terms can still have a huge dot product if its norm is large. Classic
//! nearest-neighbor pruning (`dist(q, center) - radius`) therefore does not
//! apply. The bound used here instead is
//! `dot(q, center) + radius * norm(q)`, which upper-bounds `dot(q, x)` for
//! every `x` inside the ball (Cauchy-Schwarz on `x - center`). Pruning with
//! an upper bound is safe: a subtree is skipped only when no point in it can
//! beat the worst result already kept.
//!
//! Search is exact, not approximate: branch-and-bound returns the same top-N
//! as a full scan, it just avoids visiting subtrees that cannot contribute.
//!
//! # Usage
//!
//! ```rust
//! use mipsearch::{BallTree, BallTreeParams, ItemMatrix, search};
//!
//! let items = ItemMatrix::from_rows(&[
//!     vec![1.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![0.9, 0.1],
//! ])?;
//!
//! let params = BallTreeParams::default().with_seed(42);
//! let tree = BallTree::build(&items, &params)?;
//!
//! let top = search::single_tree(&tree, &[1.0, 0.0], 2)?;
//! assert_eq!(top[0].0, 0);
//! # Ok::<(), mipsearch::MipsError>(())
//! ```
//!
//! # Concurrency
//!
//! A built tree and its matrix are immutable; queries take `&self` only and
//! own their collector, so concurrent queries against one tree need no
//! locking. Construction must complete before the tree is shared.
//!
//! # References
//!
//! - Ram & Gray (2012): "Maximum Inner-Product Search using Cone Trees"
//! - Koenigstein, Ram & Shavitt (2012): "Efficient retrieval of
//!   recommendations in a matrix factorization framework"
//! - Omohundro (1989): "Five balltree construction algorithms"

pub mod error;
pub mod math;
pub mod matrix;
pub mod search;
pub mod topn;
pub mod tree;

pub use error::{MipsError, Result};
pub use matrix::ItemMatrix;
pub use topn::TopN;
pub use tree::{BallTree, BallTreeParams, BallView, NodeId};
