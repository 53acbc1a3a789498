//! Core dataset structure.
//!
//! A [`Dataset`] is the immutable pair of a dense feature matrix and a
//! binary label vector. All shape and domain checks happen in
//! [`Dataset::new`], so training code can index freely afterwards.

use crate::core::error::{Result, XGBError};
use crate::core::types::*;
use crate::{ensure, input_error};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

/// Main dataset structure for training
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature matrix (num_data × num_features)
    features: Array2<f64>,
    /// Target labels (num_data,), each 0.0 or 1.0
    labels: Array1<Label>,
    /// Feature names for interpretability
    feature_names: Option<Vec<String>>,
}

/// Dataset information structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Number of samples
    pub num_samples: usize,
    /// Number of features
    pub num_features: usize,
    /// Number of positive labels
    pub num_positive: usize,
    /// Fraction of positive labels
    pub positive_rate: f64,
    /// Features with a single distinct value (they can never be split on)
    pub constant_features: Vec<FeatureIndex>,
}

impl Dataset {
    /// Create a new dataset from arrays.
    ///
    /// Fails with an invalid-input error when the matrix is empty, when the
    /// label count differs from the row count, when a label is not 0 or 1,
    /// or when a feature value is NaN or infinite.
    pub fn new(features: Array2<f64>, labels: Array1<Label>) -> Result<Self> {
        let (num_data, num_features) = features.dim();

        ensure!(num_data > 0, XGBError::invalid_input("dataset has no rows"));
        ensure!(
            num_features > 0,
            XGBError::invalid_input("dataset has no feature columns")
        );

        if labels.len() != num_data {
            return Err(XGBError::dimension_mismatch(
                format!("labels length: {}", num_data),
                format!("labels length: {}", labels.len()),
            ));
        }

        if let Some((row, &label)) = labels
            .iter()
            .enumerate()
            .find(|(_, &label)| label != 0.0 && label != 1.0)
        {
            return Err(input_error!(
                "label {} at row {} is not binary (expected 0 or 1)",
                label,
                row
            ));
        }

        super::utils::check_finite(&features.view())?;

        Ok(Dataset {
            features,
            labels,
            feature_names: None,
        })
    }

    /// Attach feature names, one per column.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Result<Self> {
        if names.len() != self.num_features() {
            return Err(XGBError::dimension_mismatch(
                format!("feature names length: {}", self.num_features()),
                format!("feature names length: {}", names.len()),
            ));
        }
        self.feature_names = Some(names);
        Ok(self)
    }

    /// Get number of data points
    pub fn num_data(&self) -> usize {
        self.features.nrows()
    }

    /// Get number of features
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Get features view
    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.features.view()
    }

    /// Get labels view
    pub fn labels(&self) -> ArrayView1<'_, Label> {
        self.labels.view()
    }

    /// Get label for a specific data point
    pub fn label(&self, index: RowIndex) -> Option<Label> {
        self.labels.get(index).copied()
    }

    /// Get feature names
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    /// Summarize the dataset.
    pub fn info(&self) -> DatasetInfo {
        let num_positive = self.labels.iter().filter(|&&label| label == 1.0).count();
        let constant_features = (0..self.num_features())
            .filter(|&k| {
                let column = self.features.column(k);
                let first = column[0];
                column.iter().all(|&value| value == first)
            })
            .collect();

        DatasetInfo {
            num_samples: self.num_data(),
            num_features: self.num_features(),
            num_positive,
            positive_rate: num_positive as f64 / self.num_data() as f64,
            constant_features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dataset_creation() {
        let features = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let labels = array![0.0, 1.0, 1.0];

        let dataset = Dataset::new(features, labels).unwrap();
        assert_eq!(dataset.num_data(), 3);
        assert_eq!(dataset.num_features(), 2);
        assert_eq!(dataset.label(1), Some(1.0));
        assert_eq!(dataset.label(3), None);
        assert!(dataset.feature_names().is_none());
    }

    #[test]
    fn test_dimension_mismatch() {
        let features = array![[1.0], [2.0], [3.0]];
        let labels = array![0.0, 1.0];

        let err = Dataset::new(features, labels).unwrap_err();
        assert!(matches!(err, XGBError::DimensionMismatch { .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let no_columns = Array2::<f64>::zeros((4, 0));
        assert!(Dataset::new(no_columns, Array1::zeros(4))
            .unwrap_err()
            .is_invalid_input());

        let no_rows = Array2::<f64>::zeros((0, 3));
        assert!(Dataset::new(no_rows, Array1::zeros(0))
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_non_binary_labels_rejected() {
        let features = array![[1.0], [2.0]];
        let err = Dataset::new(features, array![0.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_non_finite_features_rejected() {
        let features = array![[1.0, f64::NAN], [2.0, 3.0]];
        assert!(Dataset::new(features, array![0.0, 1.0]).is_err());

        let features = array![[1.0, 0.0], [f64::INFINITY, 3.0]];
        assert!(Dataset::new(features, array![0.0, 1.0]).is_err());
    }

    #[test]
    fn test_feature_names() {
        let dataset = Dataset::new(array![[1.0, 2.0]], array![1.0]).unwrap();
        assert!(dataset.clone().with_feature_names(vec!["a".into()]).is_err());

        let named = dataset
            .with_feature_names(vec!["a".into(), "b".into()])
            .unwrap();
        assert_eq!(named.feature_names().unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_dataset_info() {
        let features = array![[1.0, 7.0], [2.0, 7.0], [3.0, 7.0], [4.0, 7.0]];
        let dataset = Dataset::new(features, array![0.0, 0.0, 1.0, 1.0]).unwrap();

        let info = dataset.info();
        assert_eq!(info.num_samples, 4);
        assert_eq!(info.num_positive, 2);
        assert_eq!(info.positive_rate, 0.5);
        assert_eq!(info.constant_features, vec![1]);
    }
}
