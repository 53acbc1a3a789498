//! Tree node representation.
//!
//! A tree is a recursive tagged union: every node is either a split with two
//! owned children or a leaf carrying a payload. While a tree is being grown
//! the payload is the set of training rows that reached the leaf; once
//! growth is done each row set is replaced by a score with
//! [`Node::map_leaves`], which keeps the shape of the tree intact.

use crate::core::types::{FeatureIndex, RowIndex};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Training rows that reached a node, in the order they were partitioned.
pub type RowSet = Vec<RowIndex>;

/// Tree node, either an internal split or a leaf with payload `L`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node<L> {
    /// Internal node routing rows to two children
    Split(SplitNode<L>),
    /// Terminal node
    Leaf(L),
}

/// Internal node data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitNode<L> {
    /// Split feature index
    pub feature: FeatureIndex,
    /// Rows with `value <= threshold` go left
    pub threshold: f64,
    /// Gain recorded when the split was chosen
    pub gain: f64,
    /// Left subtree
    pub left: Box<Node<L>>,
    /// Right subtree
    pub right: Box<Node<L>>,
}

impl<L> SplitNode<L> {
    /// Returns true if `value` is routed to the left child.
    #[inline]
    pub fn goes_left(&self, value: f64) -> bool {
        value <= self.threshold
    }
}

impl<L> Node<L> {
    /// Creates a split node owning both children.
    pub fn split(feature: FeatureIndex, threshold: f64, gain: f64, left: Node<L>, right: Node<L>) -> Self {
        Node::Split(SplitNode {
            feature,
            threshold,
            gain,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Returns true if this node is a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Returns the leaf payload, if this is a leaf.
    pub fn leaf(&self) -> Option<&L> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Split(_) => None,
        }
    }

    /// Number of split levels on the longest root-to-leaf path.
    /// A lone leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Split(split) => 1 + split.left.depth().max(split.right.depth()),
        }
    }

    /// Number of leaves in the subtree.
    pub fn num_leaves(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Split(split) => split.left.num_leaves() + split.right.num_leaves(),
        }
    }

    /// Number of nodes (splits and leaves) in the subtree.
    pub fn num_nodes(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Split(split) => 1 + split.left.num_nodes() + split.right.num_nodes(),
        }
    }

    /// Leaf payloads from left to right.
    pub fn leaves(&self) -> Vec<&L> {
        let mut leaves = Vec::with_capacity(self.num_leaves());
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a L>) {
        match self {
            Node::Leaf(value) => leaves.push(value),
            Node::Split(split) => {
                split.left.collect_leaves(leaves);
                split.right.collect_leaves(leaves);
            }
        }
    }

    /// Visits every split node in pre-order.
    pub fn for_each_split<F: FnMut(&SplitNode<L>)>(&self, f: &mut F) {
        if let Node::Split(split) = self {
            f(split);
            split.left.for_each_split(f);
            split.right.for_each_split(f);
        }
    }

    /// Builds a tree of the same shape with every leaf payload mapped by `f`.
    pub fn map_leaves<M, F: FnMut(&L) -> M>(&self, f: &mut F) -> Node<M> {
        match self {
            Node::Leaf(value) => Node::Leaf(f(value)),
            Node::Split(split) => Node::Split(SplitNode {
                feature: split.feature,
                threshold: split.threshold,
                gain: split.gain,
                left: Box::new(split.left.map_leaves(f)),
                right: Box::new(split.right.map_leaves(f)),
            }),
        }
    }

    /// Follows the splits for one feature row and returns the leaf payload.
    ///
    /// The caller guarantees the row has at least as many columns as any
    /// split feature index.
    pub fn route(&self, row: &ArrayView1<'_, f64>) -> &L {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(value) => return value,
                Node::Split(split) => {
                    node = if split.goes_left(row[split.feature]) {
                        split.left.as_ref()
                    } else {
                        split.right.as_ref()
                    };
                }
            }
        }
    }
}
