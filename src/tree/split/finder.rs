//! Exact greedy split finding.
//!
//! For every feature the active rows are sorted by value, and every midpoint
//! between two consecutive distinct values is tried as a threshold. This
//! costs `O(d · n log n)` per node because each node sorts its own rows;
//! no pre-sorted column cache or histogram is used, so the chosen split is
//! exactly the one an exhaustive scan finds.

use crate::config::Config;
use crate::core::types::{FeatureIndex, RowIndex, Score};
use crate::tree::node::RowSet;
use crate::tree::split::gain::{leaf_score, split_gain};
use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;

/// Best split of a node, with the node's rows partitioned by it.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInfo {
    /// Feature index for the split
    pub feature: FeatureIndex,
    /// Rows with `value <= threshold` go left
    pub threshold: f64,
    /// Split gain (improvement of the second-order objective)
    pub gain: f64,
    /// Rows sent left, in the node's row order
    pub left: RowSet,
    /// Rows sent right, in the node's row order
    pub right: RowSet,
}

impl SplitInfo {
    /// Number of rows sent left.
    pub fn left_count(&self) -> usize {
        self.left.len()
    }

    /// Number of rows sent right.
    pub fn right_count(&self) -> usize {
        self.right.len()
    }
}

/// Best threshold found on a single feature, before partitioning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate {
    /// Feature index for the split
    pub feature: FeatureIndex,
    /// Threshold value
    pub threshold: f64,
    /// Split gain
    pub gain: f64,
}

/// Configuration for split finding operations.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitFinderConfig {
    /// L2 regularization added to every hessian denominator
    pub reg_lambda: f64,
    /// Minimum gain required for a split
    pub prune_gamma: f64,
    /// Scan features on the rayon pool
    pub parallel: bool,
}

impl Default for SplitFinderConfig {
    fn default() -> Self {
        SplitFinderConfig {
            reg_lambda: 0.0,
            prune_gamma: 0.0,
            parallel: false,
        }
    }
}

impl From<&Config> for SplitFinderConfig {
    fn from(config: &Config) -> Self {
        SplitFinderConfig {
            reg_lambda: config.reg_lambda,
            prune_gamma: config.prune_gamma,
            parallel: config.parallel_split_search,
        }
    }
}

/// Split finder for identifying the gain-maximizing feature and threshold.
#[derive(Debug, Clone)]
pub struct SplitFinder {
    config: SplitFinderConfig,
}

impl SplitFinder {
    /// Creates a new split finder with the given configuration.
    pub fn new(config: SplitFinderConfig) -> Self {
        SplitFinder { config }
    }

    /// Returns a reference to the current configuration.
    pub fn config(&self) -> &SplitFinderConfig {
        &self.config
    }

    /// Finds the best split of `rows`, or `None` when no candidate reaches
    /// `prune_gamma` (including when no feature has two distinct values).
    ///
    /// Ties keep the earliest feature, then the earliest threshold. The
    /// parallel scan computes the same per-feature winners and reduces them
    /// in feature order, so it returns the identical split.
    pub fn find_best_split(
        &self,
        rows: &[RowIndex],
        features: &ArrayView2<'_, f64>,
        residuals: &ArrayView1<'_, Score>,
        hessians: &ArrayView1<'_, Score>,
    ) -> Option<SplitInfo> {
        let sum_residual: f64 = rows.iter().map(|&row| residuals[row]).sum();
        let sum_hessian: f64 = rows.iter().map(|&row| hessians[row]).sum();
        let parent_score = leaf_score(sum_residual, sum_hessian, self.config.reg_lambda);

        let scan = |feature: FeatureIndex| {
            self.find_best_split_for_feature(
                feature,
                rows,
                features,
                residuals,
                hessians,
                sum_residual,
                sum_hessian,
                parent_score,
            )
        };

        let num_features = features.ncols();
        let per_feature: Vec<Option<SplitCandidate>> = if self.config.parallel {
            (0..num_features).into_par_iter().map(scan).collect()
        } else {
            (0..num_features).map(scan).collect()
        };

        let mut best: Option<SplitCandidate> = None;
        let mut best_gain = f64::NEG_INFINITY;
        for candidate in per_feature.into_iter().flatten() {
            if candidate.gain > best_gain {
                best_gain = candidate.gain;
                best = Some(candidate);
            }
        }

        let best = best?;
        if !(best.gain >= self.config.prune_gamma) {
            log::trace!(
                "Rejecting split on feature {} with gain {} < prune_gamma {}",
                best.feature,
                best.gain,
                self.config.prune_gamma
            );
            return None;
        }

        let (left, right): (RowSet, RowSet) = rows
            .iter()
            .partition(|&&row| features[[row, best.feature]] <= best.threshold);

        Some(SplitInfo {
            feature: best.feature,
            threshold: best.threshold,
            gain: best.gain,
            left,
            right,
        })
    }

    /// Finds the best threshold on one feature, ignoring `prune_gamma`.
    ///
    /// Returns `None` when the feature has at most one distinct value among
    /// `rows`.
    #[allow(clippy::too_many_arguments)]
    pub fn find_best_split_for_feature(
        &self,
        feature: FeatureIndex,
        rows: &[RowIndex],
        features: &ArrayView2<'_, f64>,
        residuals: &ArrayView1<'_, Score>,
        hessians: &ArrayView1<'_, Score>,
        sum_residual: f64,
        sum_hessian: f64,
        parent_score: f64,
    ) -> Option<SplitCandidate> {
        // Stable sort keeps the node's row order inside each group of equal values.
        let mut sorted: Vec<(f64, RowIndex)> = rows
            .iter()
            .map(|&row| (features[[row, feature]], row))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let reg_lambda = self.config.reg_lambda;
        let mut best: Option<SplitCandidate> = None;
        let mut best_gain = f64::NEG_INFINITY;
        let mut left_sum_residual = 0.0;
        let mut left_sum_hessian = 0.0;

        let mut start = 0;
        while start < sorted.len() {
            let value = sorted[start].0;
            let mut end = start;
            while end < sorted.len() && sorted[end].0 == value {
                left_sum_residual += residuals[sorted[end].1];
                left_sum_hessian += hessians[sorted[end].1];
                end += 1;
            }
            if end == sorted.len() {
                break;
            }

            let threshold = midpoint(value, sorted[end].0);
            let gain = split_gain(
                left_sum_residual,
                left_sum_hessian,
                sum_residual - left_sum_residual,
                sum_hessian - left_sum_hessian,
                parent_score,
                reg_lambda,
            );

            if gain > best_gain {
                best_gain = gain;
                best = Some(SplitCandidate {
                    feature,
                    threshold,
                    gain,
                });
            }
            start = end;
        }

        best
    }
}

/// Midpoint of two consecutive distinct values, kept in `[lower, upper)` so
/// the partition agrees with the scan even for adjacent floats.
fn midpoint(lower: f64, upper: f64) -> f64 {
    let mid = (lower + upper) / 2.0;
    let mid = if mid.is_finite() {
        mid
    } else {
        lower / 2.0 + upper / 2.0
    };
    if mid >= upper {
        lower
    } else {
        mid
    }
}
