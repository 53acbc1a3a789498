//! Structural properties of grown trees on random problems.

use approx::assert_relative_eq;
use ndarray::{Array1, Array2, Axis};
use proptest::prelude::*;
use xgb_classifier::tree::split::{SplitFinder, SplitFinderConfig};
use xgb_classifier::tree::{Node, RowSet, TreeBuilder};
use xgb_classifier::K_EPSILON;

fn problem() -> impl Strategy<Value = (Array2<f64>, Array1<f64>, Array1<f64>)> {
    (2usize..40, 1usize..4).prop_flat_map(|(n, d)| {
        (
            // Few distinct values so ties are common.
            prop::collection::vec(0i32..6, n * d),
            prop::collection::vec(-1.0f64..1.0, n),
            prop::collection::vec(0.01f64..0.25, n),
        )
            .prop_map(move |(values, residuals, hessians)| {
                let features = Array2::from_shape_vec(
                    (n, d),
                    values.into_iter().map(f64::from).collect(),
                )
                .unwrap();
                (features, Array1::from(residuals), Array1::from(hessians))
            })
    })
}

fn builder(max_depth: usize, reg_lambda: f64, prune_gamma: f64, parallel: bool) -> TreeBuilder {
    TreeBuilder::new(
        SplitFinder::new(SplitFinderConfig {
            reg_lambda,
            prune_gamma,
            parallel,
        }),
        max_depth,
    )
}

/// Checks every split below `node` and returns the first violation.
fn check_splits(node: &Node<RowSet>, features: &Array2<f64>, prune_gamma: f64) -> Option<String> {
    match node {
        Node::Leaf(_) => None,
        Node::Split(split) => {
            if split.gain < prune_gamma {
                return Some(format!("gain {} below prune_gamma {}", split.gain, prune_gamma));
            }
            let left: Vec<usize> = split.left.leaves().into_iter().flatten().copied().collect();
            let right: Vec<usize> = split.right.leaves().into_iter().flatten().copied().collect();
            if left.is_empty() || right.is_empty() {
                return Some("split with an empty side".to_string());
            }
            if let Some(row) = left.iter().find(|&&row| features[[row, split.feature]] > split.threshold) {
                return Some(format!("row {} sent left past threshold", row));
            }
            if let Some(row) = right.iter().find(|&&row| features[[row, split.feature]] <= split.threshold) {
                return Some(format!("row {} sent right below threshold", row));
            }
            check_splits(&split.left, features, prune_gamma)
                .or_else(|| check_splits(&split.right, features, prune_gamma))
        }
    }
}

proptest! {
    #[test]
    fn grown_trees_respect_structural_invariants(
        (features, residuals, hessians) in problem(),
        max_depth in 1usize..5,
        reg_lambda in 0.0f64..2.0,
        prune_gamma in 0.0f64..0.5,
    ) {
        let grown = builder(max_depth, reg_lambda, prune_gamma, false)
            .grow(&features.view(), &residuals.view(), &hessians.view());

        prop_assert!(grown.depth() <= max_depth);

        let mut rows: Vec<usize> = grown.root().leaves().into_iter().flatten().copied().collect();
        rows.sort_unstable();
        prop_assert_eq!(rows, (0..features.nrows()).collect::<Vec<_>>());

        let violation = check_splits(grown.root(), &features, prune_gamma);
        prop_assert!(violation.is_none(), "{:?}", violation);
    }

    #[test]
    fn leaf_values_follow_closed_form(
        (features, residuals, hessians) in problem(),
        max_depth in 1usize..4,
        reg_lambda in 0.0f64..2.0,
    ) {
        let grown = builder(max_depth, reg_lambda, 0.0, false)
            .grow(&features.view(), &residuals.view(), &hessians.view());
        let tree = grown.convert_leaves(&residuals.view(), &hessians.view());

        prop_assert_eq!(tree.num_nodes(), grown.root().num_nodes());
        let row_sets = grown.root().leaves();
        let values = tree.root().leaves();
        prop_assert_eq!(row_sets.len(), values.len());

        for (rows, &value) in row_sets.into_iter().zip(values) {
            let g: f64 = rows.iter().map(|&row| residuals[row]).sum();
            let h: f64 = rows.iter().map(|&row| hessians[row]).sum();
            assert_relative_eq!(value, g / (h + reg_lambda + K_EPSILON), max_relative = 1e-12);

            // Every row of the leaf is routed back to it.
            for &row in rows {
                prop_assert_eq!(tree.predict_row(&features.row(row)).unwrap(), value);
            }
        }
    }

    #[test]
    fn parallel_scan_matches_sequential(
        (features, residuals, hessians) in problem(),
        max_depth in 1usize..4,
    ) {
        let sequential = builder(max_depth, 1.0, 0.0, false)
            .build(&features.view(), &residuals.view(), &hessians.view());
        let parallel = builder(max_depth, 1.0, 0.0, true)
            .build(&features.view(), &residuals.view(), &hessians.view());
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn duplicated_column_ties_go_to_lower_feature(
        (features, residuals, hessians) in problem(),
    ) {
        let column = features.column(0).insert_axis(Axis(1));
        let doubled = ndarray::concatenate(Axis(1), &[column, column]).unwrap();

        let tree = builder(1, 0.0, 0.0, false)
            .build(&doubled.view(), &residuals.view(), &hessians.view());
        if let Node::Split(split) = tree.root() {
            prop_assert_eq!(split.feature, 0);
        }
    }
}
