//! Split finding.
//!
//! [`gain`] holds the closed-form score formulas and [`finder`] runs the
//! exact greedy scan over every feature of a node.

pub mod finder;
pub mod gain;

pub use finder::{SplitCandidate, SplitFinder, SplitFinderConfig, SplitInfo};
pub use gain::{leaf_output, leaf_score, split_gain};
