//! Dataset management.
//!
//! Loading files and splitting train/test sets is left to the caller; this
//! module only validates and holds in-memory arrays.

pub mod dataset;

pub use dataset::{Dataset, DatasetInfo};

/// Validation helpers shared by training and prediction.
pub mod utils {
    use crate::core::error::{Result, XGBError};
    use ndarray::ArrayView2;

    /// Reject NaN or infinite feature values.
    pub fn check_finite(features: &ArrayView2<'_, f64>) -> Result<()> {
        for ((row, column), &value) in features.indexed_iter() {
            if !value.is_finite() {
                return Err(XGBError::invalid_input(format!(
                    "feature {} at row {} is not finite ({})",
                    column, row, value
                )));
            }
        }
        Ok(())
    }

    /// Validate a prediction matrix against the training column count.
    pub fn check_prediction_input(
        features: &ArrayView2<'_, f64>,
        num_features: usize,
    ) -> Result<()> {
        if features.ncols() != num_features {
            return Err(XGBError::dimension_mismatch(
                format!("{} feature columns", num_features),
                format!("{} feature columns", features.ncols()),
            ));
        }
        check_finite(features)
    }

}
