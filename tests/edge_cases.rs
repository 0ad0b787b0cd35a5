//! Edge case tests for mipsearch.
//!
//! Boundary parameters, degenerate matrices, and the concrete scenarios the
//! index is expected to reproduce exactly.

use std::collections::HashSet;

use mipsearch::{search, BallTree, BallTreeParams, ItemMatrix, MipsError};

fn axes_matrix() -> ItemMatrix {
    ItemMatrix::from_rows(&[
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![-1.0, 0.0],
        vec![0.0, -1.0],
        vec![0.9, 0.1],
    ])
    .unwrap()
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn top_two_on_axes_regardless_of_tree_parameters() {
    let items = axes_matrix();
    let q = [1.0, 0.0];

    let expected = vec![(0, 1.0), (4, 0.9)];
    assert_eq!(search::linear(&items, &q, 2).unwrap(), expected);

    for leaf_threshold in 1..=6 {
        for max_depth in 0..=4 {
            let params = BallTreeParams {
                leaf_threshold,
                max_depth,
                seed: Some(99),
            };
            let tree = BallTree::build(&items, &params).unwrap();
            assert_eq!(
                search::single_tree(&tree, &q, 2).unwrap(),
                expected,
                "leaf_threshold {leaf_threshold}, max_depth {max_depth}"
            );
        }
    }
}

#[test]
fn exclusion_drops_the_winner() {
    let items = axes_matrix();
    let q = [1.0, 0.0];
    let excluded: HashSet<usize> = [0].into_iter().collect();

    // rows 1 and 3 tie at 0.0 behind row 4; the linear scan keeps row 1
    // (earlier tied offers are retained)
    let by_scan = search::linear_excluding(&items, &q, 2, &excluded).unwrap();
    assert_eq!(by_scan, vec![(4, 0.9), (1, 0.0)]);

    for leaf_threshold in 1..=6 {
        let params = BallTreeParams {
            leaf_threshold,
            max_depth: 32,
            seed: Some(99),
        };
        let tree = BallTree::build(&items, &params).unwrap();
        let by_tree = search::single_tree_excluding(&tree, &q, 2, &excluded).unwrap();
        assert_eq!(by_tree[0], (4, 0.9));
        assert_eq!(by_tree[1].1, 0.0);
        assert!(
            by_tree[1].0 == 1 || by_tree[1].0 == 3,
            "tied slot went to row {}",
            by_tree[1].0
        );
    }
}

// =============================================================================
// Boundary parameters
// =============================================================================

#[test]
fn leaf_threshold_of_matrix_size_degenerates_to_linear_search() {
    let items = axes_matrix();
    let params = BallTreeParams {
        leaf_threshold: items.num_rows(),
        max_depth: 32,
        seed: Some(1),
    };
    let tree = BallTree::build(&items, &params).unwrap();
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.depth(), 1);

    let q = [0.3, -0.7];
    assert_eq!(
        search::single_tree(&tree, &q, 3).unwrap(),
        search::linear(&items, &q, 3).unwrap()
    );
}

#[test]
fn single_row_matrix() {
    let items = ItemMatrix::from_rows(&[vec![2.0, -1.0, 0.5]]).unwrap();
    let params = BallTreeParams::default().with_seed(1);
    let tree = BallTree::build(&items, &params).unwrap();
    assert_eq!(tree.num_nodes(), 1);

    let top = search::single_tree(&tree, &[1.0, 1.0, 1.0], 5).unwrap();
    assert_eq!(top, vec![(0, 1.5)]);
}

#[test]
fn requested_n_of_zero_is_empty_not_an_error() {
    let items = axes_matrix();
    let tree = BallTree::build(&items, &BallTreeParams::default().with_seed(1)).unwrap();
    assert!(search::linear(&items, &[1.0, 0.0], 0).unwrap().is_empty());
    assert!(search::single_tree(&tree, &[1.0, 0.0], 0)
        .unwrap()
        .is_empty());
}

#[test]
fn exclusion_of_every_row_is_empty_not_an_error() {
    let items = axes_matrix();
    let tree = BallTree::build(&items, &BallTreeParams::default().with_seed(1)).unwrap();
    let excluded: HashSet<usize> = (0..items.num_rows()).collect();
    assert!(
        search::single_tree_excluding(&tree, &[1.0, 0.0], 3, &excluded)
            .unwrap()
            .is_empty()
    );
}

// =============================================================================
// Degenerate data
// =============================================================================

#[test]
fn all_identical_rows_build_and_search() {
    let rows: Vec<Vec<f64>> = (0..50).map(|_| vec![0.5, -0.25]).collect();
    let items = ItemMatrix::from_rows(&rows).unwrap();
    let params = BallTreeParams {
        leaf_threshold: 4,
        max_depth: 32,
        seed: Some(5),
    };
    let tree = BallTree::build(&items, &params).unwrap();

    let top = search::single_tree(&tree, &[1.0, 0.0], 3).unwrap();
    assert_eq!(top.len(), 3);
    for &(_, score) in &top {
        assert!((score - 0.5).abs() < 1e-12);
    }
}

#[test]
fn zero_query_scores_everything_zero() {
    let items = axes_matrix();
    let tree = BallTree::build(&items, &BallTreeParams::default().with_seed(2)).unwrap();
    let top = search::single_tree(&tree, &[0.0, 0.0], 5).unwrap();
    assert_eq!(top.len(), 5);
    for &(_, score) in &top {
        assert_eq!(score, 0.0);
    }
}

#[test]
fn one_dimensional_items() {
    let items = ItemMatrix::from_rows(&[vec![3.0], vec![-2.0], vec![7.0], vec![0.0]]).unwrap();
    let params = BallTreeParams {
        leaf_threshold: 1,
        max_depth: 8,
        seed: Some(13),
    };
    let tree = BallTree::build(&items, &params).unwrap();
    assert_eq!(
        search::single_tree(&tree, &[1.0], 2).unwrap(),
        vec![(2, 7.0), (0, 3.0)]
    );
    assert_eq!(
        search::single_tree(&tree, &[-1.0], 1).unwrap(),
        vec![(1, 2.0)]
    );
}

// =============================================================================
// Contract violations
// =============================================================================

#[test]
fn malformed_matrices_are_rejected() {
    assert_eq!(ItemMatrix::from_rows(&[]), Err(MipsError::EmptyMatrix));
    assert_eq!(
        ItemMatrix::from_rows(&[vec![], vec![]]),
        Err(MipsError::ZeroDimension)
    );
    assert!(matches!(
        ItemMatrix::from_rows(&[vec![1.0], vec![1.0, 2.0]]),
        Err(MipsError::RaggedRow { row: 1, .. })
    ));
}

#[test]
fn query_dimension_is_checked() {
    let items = axes_matrix();
    let tree = BallTree::build(&items, &BallTreeParams::default().with_seed(1)).unwrap();
    assert_eq!(
        search::single_tree(&tree, &[1.0], 2),
        Err(MipsError::DimensionMismatch {
            query_dim: 1,
            item_dim: 2
        })
    );
    assert_eq!(
        search::linear(&items, &[1.0, 2.0, 3.0], 2),
        Err(MipsError::DimensionMismatch {
            query_dim: 3,
            item_dim: 2
        })
    );
}
