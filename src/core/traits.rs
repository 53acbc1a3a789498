//! Core trait abstractions.

use crate::core::error::Result;
use crate::core::types::{Label, Score};
use ndarray::{ArrayView1, ArrayViewMut1};
use std::fmt::Debug;

/// Trait for objective functions driving the boosting loop.
///
/// The boosting loop never talks about a loss directly: it asks the
/// objective for a starting raw score, for the per-row first and second
/// order terms at the current raw scores, and for the transform from raw
/// scores to the output scale.
pub trait ObjectiveFunction: Send + Sync + Debug {
    /// Raw score every row starts from before the first tree.
    fn init_score(&self, base_score: f64) -> Score;

    /// Fill `residuals` with the negative gradient and `hessians` with the
    /// second order term at the current raw `scores`.
    fn compute_gradients(
        &self,
        scores: &ArrayView1<'_, Score>,
        labels: &ArrayView1<'_, Label>,
        residuals: &mut ArrayViewMut1<'_, Score>,
        hessians: &mut ArrayViewMut1<'_, Score>,
    ) -> Result<()>;

    /// Transform raw scores to the output scale in place.
    fn transform_predictions(&self, scores: &mut ArrayViewMut1<'_, Score>);

    /// Get the objective function name.
    fn name(&self) -> &'static str;

    /// Validate labels for this objective function.
    fn validate_labels(&self, labels: &ArrayView1<'_, Label>) -> Result<()>;
}
