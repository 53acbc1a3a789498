//! Binary logistic objective.

use crate::core::error::{Result, XGBError};
use crate::core::traits::ObjectiveFunction;
use crate::core::types::{Label, Score};
use ndarray::{ArrayView1, ArrayViewMut1, Zip};
use num_traits::Float;

/// Logistic function `1 / (1 + e^-x)`.
#[inline]
pub fn sigmoid<T: Float>(x: T) -> T {
    T::one() / (T::one() + (-x).exp())
}

/// Log-odds of a probability, the inverse of [`sigmoid`].
#[inline]
pub fn log_odds<T: Float>(p: T) -> T {
    (p / (T::one() - p)).ln()
}

/// Binary cross-entropy objective on raw log-odds scores.
///
/// The residual is `y - p` and the hessian weight `p (1 - p)` with
/// `p = sigmoid(score)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryLogistic;

impl ObjectiveFunction for BinaryLogistic {
    fn init_score(&self, base_score: f64) -> Score {
        log_odds(base_score)
    }

    fn compute_gradients(
        &self,
        scores: &ArrayView1<'_, Score>,
        labels: &ArrayView1<'_, Label>,
        residuals: &mut ArrayViewMut1<'_, Score>,
        hessians: &mut ArrayViewMut1<'_, Score>,
    ) -> Result<()> {
        let n = scores.len();
        if labels.len() != n || residuals.len() != n || hessians.len() != n {
            return Err(XGBError::dimension_mismatch(
                format!("{} scores, labels, residuals and hessians", n),
                format!(
                    "{} labels, {} residuals, {} hessians",
                    labels.len(),
                    residuals.len(),
                    hessians.len()
                ),
            ));
        }

        Zip::from(residuals.view_mut())
            .and(hessians.view_mut())
            .and(scores)
            .and(labels)
            .for_each(|residual, hessian, &score, &label| {
                let p = sigmoid(score);
                *residual = label - p;
                *hessian = p * (1.0 - p);
            });
        Ok(())
    }

    fn transform_predictions(&self, scores: &mut ArrayViewMut1<'_, Score>) {
        scores.mapv_inplace(sigmoid);
    }

    fn name(&self) -> &'static str {
        "binary:logistic"
    }

    fn validate_labels(&self, labels: &ArrayView1<'_, Label>) -> Result<()> {
        match labels
            .iter()
            .position(|&label| label != 0.0 && label != 1.0)
        {
            Some(row) => Err(XGBError::invalid_input(format!(
                "label {} at row {} is not binary (expected 0 or 1)",
                labels[row], row
            ))),
            None => Ok(()),
        }
    }
}
