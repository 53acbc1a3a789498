//! Binary classification metrics.
//!
//! Every metric rejects empty inputs and inputs of different lengths.

use crate::core::constants::{DEFAULT_DECISION_THRESHOLD, LOGLOSS_EPSILON};
use crate::core::error::{Result, XGBError};
use crate::core::types::{ClassLabel, Label, Score};
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::fmt;

fn validate_inputs(predictions: usize, targets: usize) -> Result<()> {
    if predictions != targets {
        return Err(XGBError::dimension_mismatch(
            format!("targets: {}", predictions),
            format!("targets: {}", targets),
        ));
    }
    if predictions == 0 {
        return Err(XGBError::invalid_input("Empty input arrays"));
    }
    Ok(())
}

/// Fraction of predicted class labels equal to the targets.
pub fn accuracy(predictions: &ArrayView1<'_, ClassLabel>, targets: &ArrayView1<'_, Label>) -> Result<f64> {
    validate_inputs(predictions.len(), targets.len())?;
    let correct = predictions
        .iter()
        .zip(targets.iter())
        .filter(|(&pred, &target)| f64::from(pred) == target)
        .count();
    Ok(correct as f64 / predictions.len() as f64)
}

/// Mean binary cross-entropy of probabilities against 0/1 targets.
///
/// Probabilities are clipped to `[1e-15, 1 - 1e-15]` first.
pub fn binary_logloss(probabilities: &ArrayView1<'_, Score>, targets: &ArrayView1<'_, Label>) -> Result<f64> {
    validate_inputs(probabilities.len(), targets.len())?;
    let total: f64 = probabilities
        .iter()
        .zip(targets.iter())
        .map(|(&p, &y)| {
            let p = p.clamp(LOGLOSS_EPSILON, 1.0 - LOGLOSS_EPSILON);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum();
    Ok(total / probabilities.len() as f64)
}

/// Mean of squared differences.
pub fn mean_squared_error(predictions: &ArrayView1<'_, f64>, targets: &ArrayView1<'_, f64>) -> Result<f64> {
    validate_inputs(predictions.len(), targets.len())?;
    let total: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(&pred, &target)| (pred - target).powi(2))
        .sum();
    Ok(total / predictions.len() as f64)
}

/// Summary of binary classification quality at a decision threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Number of evaluated samples
    pub num_samples: usize,
    /// Decision threshold applied to probabilities
    pub threshold: f64,
    /// Fraction of correct labels
    pub accuracy: f64,
    /// `tp / (tp + fp)`, 0 when nothing is predicted positive
    pub precision: f64,
    /// `tp / (tp + fn)`, 0 when there are no positives
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1_score: f64,
    /// Mean binary cross-entropy
    pub log_loss: f64,
    /// True positives
    pub true_positives: usize,
    /// False positives
    pub false_positives: usize,
    /// True negatives
    pub true_negatives: usize,
    /// False negatives
    pub false_negatives: usize,
}

impl ClassificationReport {
    /// Evaluates probabilities, labelling a row positive when its
    /// probability is strictly greater than `threshold`.
    pub fn from_probabilities(
        probabilities: &ArrayView1<'_, Score>,
        targets: &ArrayView1<'_, Label>,
        threshold: f64,
    ) -> Result<Self> {
        validate_inputs(probabilities.len(), targets.len())?;

        let (mut tp, mut fp, mut tn, mut fn_) = (0, 0, 0, 0);
        for (&p, &y) in probabilities.iter().zip(targets.iter()) {
            match (p > threshold, y == 1.0) {
                (true, true) => tp += 1,
                (true, false) => fp += 1,
                (false, false) => tn += 1,
                (false, true) => fn_ += 1,
            }
        }

        let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1_score = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Ok(ClassificationReport {
            num_samples: probabilities.len(),
            threshold,
            accuracy: ratio(tp + tn, probabilities.len()),
            precision,
            recall,
            f1_score,
            log_loss: binary_logloss(probabilities, targets)?,
            true_positives: tp,
            false_positives: fp,
            true_negatives: tn,
            false_negatives: fn_,
        })
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Classification report ({} samples)", self.num_samples)?;
        writeln!(f, "  accuracy:  {:.4}", self.accuracy)?;
        writeln!(f, "  precision: {:.4}", self.precision)?;
        writeln!(f, "  recall:    {:.4}", self.recall)?;
        writeln!(f, "  f1:        {:.4}", self.f1_score)?;
        writeln!(f, "  logloss:   {:.6}", self.log_loss)?;
        write!(
            f,
            "  confusion: tp={} fp={} tn={} fn={}",
            self.true_positives, self.false_positives, self.true_negatives, self.false_negatives
        )
    }
}

/// Evaluates probabilities at the default 0.5 threshold.
pub fn evaluate_binary_classification(
    probabilities: &ArrayView1<'_, Score>,
    targets: &ArrayView1<'_, Label>,
) -> Result<ClassificationReport> {
    ClassificationReport::from_probabilities(probabilities, targets, DEFAULT_DECISION_THRESHOLD)
}
