//! Decision tree structures.
//!
//! [`GrowingTree`] is the tree as the builder leaves it, with row-index
//! sets in its leaves. [`GrowingTree::convert_leaves`] produces the
//! immutable [`Tree`] used for prediction, whose leaves hold scores.

use crate::core::error::{Result, XGBError};
use crate::core::types::{FeatureIndex, ImportanceType, Score};
use crate::tree::node::{Node, RowSet};
use crate::tree::split::gain::leaf_output;
use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hyperparameters a tree was grown with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum number of split levels
    pub max_depth: usize,
    /// L2 regularization on leaf values
    pub reg_lambda: f64,
    /// Minimum gain for a split
    pub prune_gamma: f64,
}

/// Tree whose leaves still hold the training rows that reached them.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowingTree {
    root: Node<RowSet>,
    params: TreeParams,
}

impl GrowingTree {
    /// Wraps a grown root node.
    pub fn new(root: Node<RowSet>, params: TreeParams) -> Self {
        GrowingTree { root, params }
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node<RowSet> {
        &self.root
    }

    /// Returns the growth hyperparameters.
    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Returns the tree depth.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.root.num_leaves()
    }

    /// Builds the prediction tree, replacing each leaf row set with
    /// `Σ residual / (Σ hessian + λ + ε)` over its rows.
    pub fn convert_leaves(
        &self,
        residuals: &ArrayView1<'_, Score>,
        hessians: &ArrayView1<'_, Score>,
    ) -> Tree {
        let reg_lambda = self.params.reg_lambda;
        let root = self.root.map_leaves(&mut |rows: &RowSet| {
            let sum_residual: f64 = rows.iter().map(|&row| residuals[row]).sum();
            let sum_hessian: f64 = rows.iter().map(|&row| hessians[row]).sum();
            leaf_output(sum_residual, sum_hessian, reg_lambda)
        });
        Tree::new(root, self.params)
    }
}

/// Decision tree with scalar leaves, one member of the ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    root: Node<Score>,
    params: TreeParams,
}

impl Tree {
    /// Creates a tree from a converted root node.
    pub fn new(root: Node<Score>, params: TreeParams) -> Self {
        Tree { root, params }
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node<Score> {
        &self.root
    }

    /// Returns the growth hyperparameters.
    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Returns the tree depth (0 for a single leaf).
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn num_leaves(&self) -> usize {
        self.root.num_leaves()
    }

    /// Returns the number of nodes in the tree.
    pub fn num_nodes(&self) -> usize {
        self.root.num_nodes()
    }

    /// Smallest column count a row needs to be routed through this tree.
    pub fn required_features(&self) -> usize {
        let mut required = 0;
        self.root
            .for_each_split(&mut |split| required = required.max(split.feature + 1));
        required
    }

    fn check_width(&self, num_columns: usize) -> Result<()> {
        let required = self.required_features();
        if num_columns < required {
            return Err(XGBError::dimension_mismatch(
                format!("at least {} feature columns", required),
                format!("{} feature columns", num_columns),
            ));
        }
        Ok(())
    }

    /// Predicts the output for a single row.
    pub fn predict_row(&self, row: &ArrayView1<'_, f64>) -> Result<Score> {
        self.check_width(row.len())?;
        Ok(*self.root.route(row))
    }

    /// Predicts the output for every row of `features`.
    pub fn predict(&self, features: &ArrayView2<'_, f64>) -> Result<Array1<Score>> {
        self.check_width(features.ncols())?;

        Ok(features
            .axis_iter(Axis(0))
            .map(|row| *self.root.route(&row))
            .collect())
    }

    /// Per-feature importance, as split counts or summed split gains.
    pub fn feature_importance(
        &self,
        num_features: usize,
        importance_type: ImportanceType,
    ) -> Array1<f64> {
        let mut importance = Array1::zeros(num_features);
        self.accumulate_importance(&mut importance, importance_type);
        importance
    }

    pub(crate) fn accumulate_importance(
        &self,
        importance: &mut Array1<f64>,
        importance_type: ImportanceType,
    ) {
        self.root.for_each_split(&mut |split| {
            let feature: FeatureIndex = split.feature;
            if feature < importance.len() {
                importance[feature] += match importance_type {
                    ImportanceType::Split => 1.0,
                    ImportanceType::Gain => split.gain,
                };
            }
        });
    }

    /// Serializes the tree structure to JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a tree from JSON.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Tree(depth={}, leaves={}, nodes={})",
            self.depth(),
            self.num_leaves(),
            self.num_nodes()
        )?;
        write_node(f, &self.root, 1)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node<Score>, indent: usize) -> fmt::Result {
    let pad = "  ".repeat(indent);
    match node {
        Node::Leaf(value) => writeln!(f, "{}leaf: {:.6}", pad, value),
        Node::Split(split) => {
            writeln!(
                f,
                "{}x[{}] <= {} (gain {:.6})",
                pad, split.feature, split.threshold, split.gain
            )?;
            write_node(f, &split.left, indent + 1)?;
            write_node(f, &split.right, indent + 1)
        }
    }
}
