//! Core data types for the gradient boosted classifier.
//!
//! Training runs in double precision end to end: features, residuals,
//! hessian weights and raw scores all use `f64` so split gains and leaf
//! values are reproducible to the last bit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prediction, gradient and hessian value type.
pub type Score = f64;

/// Target value type. Binary labels are stored as `0.0` / `1.0`.
pub type Label = f64;

/// Predicted class label (`0` or `1`).
pub type ClassLabel = u8;

/// Feature index type for identifying columns in the feature matrix.
pub type FeatureIndex = usize;

/// Row index type for identifying samples in the feature matrix.
pub type RowIndex = usize;

/// Tree node identifier used by the flat node export.
pub type NodeIndex = usize;

/// Boosting round number (zero based).
pub type IterationIndex = usize;

/// Where prediction starts accumulating tree outputs.
///
/// Training always starts from the log-odds of `base_score`. Prediction has
/// historically started from the raw `base_score` value instead; both are
/// available so callers can pick the convention they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionInit {
    /// Start from `base_score` itself.
    BaseScore,
    /// Start from `ln(base_score / (1 - base_score))`, the training initial score.
    LogOdds,
}

impl Default for PredictionInit {
    fn default() -> Self {
        PredictionInit::BaseScore
    }
}

impl fmt::Display for PredictionInit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionInit::BaseScore => write!(f, "base_score"),
            PredictionInit::LogOdds => write!(f, "log_odds"),
        }
    }
}

/// Feature importance calculation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportanceType {
    /// Number of splits using the feature
    Split,
    /// Sum of split gains attributed to the feature
    Gain,
}

impl Default for ImportanceType {
    fn default() -> Self {
        ImportanceType::Gain
    }
}

impl fmt::Display for ImportanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportanceType::Split => write!(f, "split"),
            ImportanceType::Gain => write!(f, "gain"),
        }
    }
}
