//! Evaluation metrics.
//!
//! ```rust,no_run
//! use xgb_classifier::metrics::evaluate_binary_classification;
//! use ndarray::array;
//!
//! # fn example() -> xgb_classifier::Result<()> {
//! let probabilities = array![0.8, 0.3, 0.9];
//! let targets = array![1.0, 0.0, 1.0];
//!
//! let report = evaluate_binary_classification(&probabilities.view(), &targets.view())?;
//! println!("Log Loss: {:.6}", report.log_loss);
//! # Ok(())
//! # }
//! ```

pub mod classification;

pub use classification::{
    accuracy, binary_logloss, evaluate_binary_classification, mean_squared_error,
    ClassificationReport,
};
