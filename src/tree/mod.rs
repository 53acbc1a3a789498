//! Tree learning.
//!
//! Trees are grown by exact greedy search: [`split`] evaluates every
//! threshold of every feature, [`builder`] applies it recursively up to the
//! depth limit, and [`tree`] holds the result for prediction. [`export`]
//! flattens a fitted tree for external consumers.

pub mod builder;
pub mod export;
pub mod node;
pub mod split;
pub mod tree;

pub use builder::TreeBuilder;
pub use export::{NodeDescriptor, TreeExport};
pub use node::{Node, RowSet, SplitNode};
pub use split::{SplitFinder, SplitFinderConfig, SplitInfo};
pub use tree::{GrowingTree, Tree, TreeParams};
