//! Per-round training diagnostics.

use crate::core::types::IterationIndex;
use serde::{Deserialize, Serialize};

/// Diagnostics recorded after one boosting round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number (zero based)
    pub round: IterationIndex,
    /// Mean of `(y - p)²` over the training rows after the round
    pub mean_squared_residual: f64,
    /// Binary log-loss over the training rows after the round
    pub logloss: f64,
    /// Depth of the tree fitted in this round
    pub tree_depth: usize,
    /// Number of leaves of the tree fitted in this round
    pub num_leaves: usize,
}

/// Training history owned by a fitted model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    initial_mean_squared_residual: f64,
    initial_logloss: f64,
    rounds: Vec<RoundRecord>,
}

impl TrainingHistory {
    /// Starts a history from the metrics at the initial scores.
    pub fn new(initial_mean_squared_residual: f64, initial_logloss: f64) -> Self {
        TrainingHistory {
            initial_mean_squared_residual,
            initial_logloss,
            rounds: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: RoundRecord) {
        self.rounds.push(record);
    }

    /// Mean squared residual before the first tree.
    pub fn initial_mean_squared_residual(&self) -> f64 {
        self.initial_mean_squared_residual
    }

    /// Log-loss before the first tree.
    pub fn initial_logloss(&self) -> f64 {
        self.initial_logloss
    }

    /// Records in round order.
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Number of recorded rounds.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Returns true if no round has been recorded.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Record of the last round.
    pub fn last(&self) -> Option<&RoundRecord> {
        self.rounds.last()
    }

    /// Mean squared residual before training followed by the value after
    /// each round.
    pub fn mean_squared_residuals(&self) -> Vec<f64> {
        std::iter::once(self.initial_mean_squared_residual)
            .chain(self.rounds.iter().map(|record| record.mean_squared_residual))
            .collect()
    }
}
