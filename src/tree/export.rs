//! Flat node descriptors for external tree consumers.
//!
//! Nodes are numbered in pre-order starting at 0 for the root, so a split's
//! left child is always `id + 1`.

use crate::core::types::{FeatureIndex, NodeIndex, Score};
use crate::tree::node::Node;
use crate::tree::tree::Tree;
use serde::{Deserialize, Serialize};

/// One node of an exported tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeDescriptor {
    /// Internal node
    Split {
        /// Node id
        id: NodeIndex,
        /// Split feature index
        feature_id: FeatureIndex,
        /// Rows with `value <= threshold` go left
        threshold: f64,
        /// Split gain
        gain: f64,
        /// Left child id
        left: NodeIndex,
        /// Right child id
        right: NodeIndex,
    },
    /// Terminal node
    Leaf {
        /// Node id
        id: NodeIndex,
        /// Leaf output
        value: Score,
    },
}

impl NodeDescriptor {
    /// Returns the node id.
    pub fn id(&self) -> NodeIndex {
        match self {
            NodeDescriptor::Split { id, .. } | NodeDescriptor::Leaf { id, .. } => *id,
        }
    }
}

/// Exported form of one ensemble member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeExport {
    /// Position of the tree in fit order
    pub tree_index: usize,
    /// Nodes in pre-order
    pub nodes: Vec<NodeDescriptor>,
}

impl TreeExport {
    /// Serializes the export to pretty-printed JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Tree {
    /// Flattens the tree into pre-order node descriptors.
    pub fn export_nodes(&self) -> Vec<NodeDescriptor> {
        let mut nodes = Vec::with_capacity(self.num_nodes());
        push_node(self.root(), 0, &mut nodes);
        nodes
    }
}

fn push_node(node: &Node<Score>, id: NodeIndex, nodes: &mut Vec<NodeDescriptor>) {
    match node {
        Node::Leaf(value) => nodes.push(NodeDescriptor::Leaf { id, value: *value }),
        Node::Split(split) => {
            let left = id + 1;
            let right = left + split.left.num_nodes();
            nodes.push(NodeDescriptor::Split {
                id,
                feature_id: split.feature,
                threshold: split.threshold,
                gain: split.gain,
                left,
                right,
            });
            push_node(&split.left, left, nodes);
            push_node(&split.right, right, nodes);
        }
    }
}
