//! Gradient boosting.
//!
//! [`GBDT`] runs the boosting loop and returns an [`Ensemble`], which owns
//! the fitted trees and answers prediction requests. [`fit`] and
//! [`predict`] wrap the two for callers holding plain arrays.

pub mod ensemble;
pub mod gbdt;
pub mod history;
pub mod objective;

pub use ensemble::Ensemble;
pub use gbdt::GBDT;
pub use history::{RoundRecord, TrainingHistory};
pub use objective::{log_odds, sigmoid, BinaryLogistic};

use crate::config::Config;
use crate::core::error::Result;
use crate::core::types::{ClassLabel, Label};
use crate::dataset::Dataset;
use ndarray::{Array1, ArrayView1, ArrayView2};

/// Validates the inputs and fits a model.
pub fn fit(
    features: &ArrayView2<'_, f64>,
    labels: &ArrayView1<'_, Label>,
    config: &Config,
) -> Result<Ensemble> {
    let gbdt = GBDT::new(config.clone())?;
    let dataset = Dataset::new(features.to_owned(), labels.to_owned())?;
    gbdt.train(&dataset)
}

/// Predicts class labels with a fitted model.
pub fn predict(model: &Ensemble, features: &ArrayView2<'_, f64>) -> Result<Array1<ClassLabel>> {
    model.predict(features)
}
