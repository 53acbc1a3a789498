//! System constants and default hyperparameters.

use crate::core::types::PredictionInit;

/// Guard added to every hessian denominator.
///
/// Keeps `G² / (H + λ)` and `G / (H + λ)` finite when both the hessian sum
/// and the L2 term are zero.
pub const K_EPSILON: f64 = 1e-10;

/// Probability clip used by the log-loss metric.
pub const LOGLOSS_EPSILON: f64 = 1e-15;

/// Probability above which a sample is labelled positive.
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

/// Default number of boosting rounds.
pub const DEFAULT_N_ESTIMATORS: usize = 10;

/// Default maximum tree depth.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Default learning rate (shrinkage) applied to every tree.
pub const DEFAULT_LEARNING_RATE: f64 = 0.5;

/// Default minimum gain required to accept a split.
pub const DEFAULT_PRUNE_GAMMA: f64 = 0.0;

/// Default L2 regularization added to the hessian denominator.
pub const DEFAULT_REG_LAMBDA: f64 = 0.0;

/// Default initial probability.
pub const DEFAULT_BASE_SCORE: f64 = 0.5;

/// Default starting point of prediction.
pub const DEFAULT_PREDICTION_INIT: PredictionInit = PredictionInit::BaseScore;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "XGB_";

/// Crate version string.
pub const XGB_CLASSIFIER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_domains() {
        assert!(DEFAULT_N_ESTIMATORS > 0);
        assert!(DEFAULT_MAX_DEPTH > 0);
        assert!(DEFAULT_LEARNING_RATE > 0.0);
        assert!(DEFAULT_BASE_SCORE > 0.0 && DEFAULT_BASE_SCORE < 1.0);
        assert!(K_EPSILON > 0.0 && K_EPSILON < 1e-6);
    }
}
