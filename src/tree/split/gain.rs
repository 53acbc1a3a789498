//! Second-order gain and leaf output formulas.
//!
//! With `G` the residual sum and `H` the hessian sum of a row set, a node
//! scores `G² / (H + λ + ε)` and predicts `G / (H + λ + ε)`. The split gain
//! is the children's scores minus the parent's.

use crate::core::constants::K_EPSILON;
use crate::core::types::Score;

/// Structure score of a node with the given sums.
#[inline]
pub fn leaf_score(sum_residual: f64, sum_hessian: f64, reg_lambda: f64) -> f64 {
    sum_residual * sum_residual / (sum_hessian + reg_lambda + K_EPSILON)
}

/// Output value of a leaf with the given sums.
#[inline]
pub fn leaf_output(sum_residual: f64, sum_hessian: f64, reg_lambda: f64) -> Score {
    sum_residual / (sum_hessian + reg_lambda + K_EPSILON)
}

/// Gain of splitting a node into the given left and right sums.
#[inline]
pub fn split_gain(
    left_sum_residual: f64,
    left_sum_hessian: f64,
    right_sum_residual: f64,
    right_sum_hessian: f64,
    parent_score: f64,
    reg_lambda: f64,
) -> f64 {
    leaf_score(left_sum_residual, left_sum_hessian, reg_lambda)
        + leaf_score(right_sum_residual, right_sum_hessian, reg_lambda)
        - parent_score
}
