//! Depth-bounded recursive tree growth.

use crate::config::Config;
use crate::core::types::{RowIndex, Score};
use crate::tree::node::{Node, RowSet};
use crate::tree::split::{SplitFinder, SplitFinderConfig, SplitInfo};
use crate::tree::tree::{GrowingTree, Tree, TreeParams};
use ndarray::{ArrayView1, ArrayView2};

/// Grows one tree against a residual and hessian vector.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    finder: SplitFinder,
    max_depth: usize,
}

impl TreeBuilder {
    /// Creates a builder with an explicit split finder.
    pub fn new(finder: SplitFinder, max_depth: usize) -> Self {
        TreeBuilder { finder, max_depth }
    }

    /// Creates a builder from the boosting configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SplitFinder::new(SplitFinderConfig::from(config)),
            config.max_depth,
        )
    }

    /// Returns the maximum depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the split finder.
    pub fn finder(&self) -> &SplitFinder {
        &self.finder
    }

    fn params(&self) -> TreeParams {
        let config = self.finder.config();
        TreeParams {
            max_depth: self.max_depth,
            reg_lambda: config.reg_lambda,
            prune_gamma: config.prune_gamma,
        }
    }

    /// Grows a tree over every row, leaving row sets in the leaves.
    ///
    /// When no root split reaches `prune_gamma` the tree is a single leaf
    /// holding all rows.
    pub fn grow(
        &self,
        features: &ArrayView2<'_, f64>,
        residuals: &ArrayView1<'_, Score>,
        hessians: &ArrayView1<'_, Score>,
    ) -> GrowingTree {
        let rows: Vec<RowIndex> = (0..features.nrows()).collect();
        let root = self.grow_node(rows, 0, features, residuals, hessians);
        GrowingTree::new(root, self.params())
    }

    /// Grows a tree and converts its leaves to scores.
    pub fn build(
        &self,
        features: &ArrayView2<'_, f64>,
        residuals: &ArrayView1<'_, Score>,
        hessians: &ArrayView1<'_, Score>,
    ) -> Tree {
        self.grow(features, residuals, hessians)
            .convert_leaves(residuals, hessians)
    }

    fn grow_node(
        &self,
        rows: RowSet,
        depth: usize,
        features: &ArrayView2<'_, f64>,
        residuals: &ArrayView1<'_, Score>,
        hessians: &ArrayView1<'_, Score>,
    ) -> Node<RowSet> {
        if depth >= self.max_depth {
            return Node::Leaf(rows);
        }

        match self
            .finder
            .find_best_split(&rows, features, residuals, hessians)
        {
            None => Node::Leaf(rows),
            Some(SplitInfo {
                feature,
                threshold,
                gain,
                left,
                right,
            }) => {
                log::trace!(
                    "depth {}: split x[{}] <= {} (gain {:.6}, {} | {} rows)",
                    depth,
                    feature,
                    threshold,
                    gain,
                    left.len(),
                    right.len()
                );
                let left = self.grow_node(left, depth + 1, features, residuals, hessians);
                let right = self.grow_node(right, depth + 1, features, residuals, hessians);
                Node::split(feature, threshold, gain, left, right)
            }
        }
    }
}
