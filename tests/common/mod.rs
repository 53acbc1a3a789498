//! Common test utilities for xgb-classifier integration tests.

#![allow(dead_code)]

use ndarray::{array, Array1, Array2};
use rand::prelude::*;
use xgb_classifier::*;

/// Create test features for binary classification
pub fn create_test_features_binary(num_samples: usize, num_features: usize) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(123);

    let mut features = Array2::zeros((num_samples, num_features));

    for i in 0..num_samples {
        for j in 0..num_features {
            features[[i, j]] = rng.gen_range(-3.0..3.0);
        }
    }

    features
}

/// Create test labels for binary classification
pub fn create_test_labels_binary(features: &Array2<f64>) -> Array1<f64> {
    let num_samples = features.nrows();
    let mut labels = Array1::zeros(num_samples);

    for i in 0..num_samples {
        // Simple decision boundary
        let mut score = 0.0;
        for j in 0..features.ncols() {
            score += features[[i, j]] * if j % 2 == 0 { 1.0 } else { -1.0 };
        }
        labels[i] = if score > 0.0 { 1.0 } else { 0.0 };
    }

    labels
}

/// Labels decided by feature 0 alone; the remaining columns are noise.
pub fn create_single_informative_feature_data(
    num_samples: usize,
    num_features: usize,
) -> (Array2<f64>, Array1<f64>) {
    let features = create_test_features_binary(num_samples, num_features);
    let labels = features.column(0).mapv(|x| if x > 0.5 { 1.0 } else { 0.0 });
    (features, labels)
}

/// Rows `0..n` on one feature, positive from `n / 2` on.
pub fn create_separable_data(num_samples: usize) -> (Array2<f64>, Array1<f64>) {
    let features = Array1::range(0.0, num_samples as f64, 1.0).insert_axis(ndarray::Axis(1));
    let labels = (0..num_samples)
        .map(|i| if i >= num_samples / 2 { 1.0 } else { 0.0 })
        .collect();
    (features, labels)
}

/// The four-row, one-feature example.
pub fn create_four_row_example() -> (Array2<f64>, Array1<f64>) {
    (array![[1.0], [2.0], [3.0], [4.0]], array![0.0, 0.0, 1.0, 1.0])
}

/// Random residuals in `[-1, 1)` and hessian weights in `(0, 0.25]`.
pub fn create_test_gradients(num_samples: usize, seed: u64) -> (Array1<f64>, Array1<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let residuals = (0..num_samples).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let hessians = (0..num_samples).map(|_| rng.gen_range(0.01..=0.25)).collect();
    (residuals, hessians)
}

/// Create a small test configuration
pub fn create_test_config(n_estimators: usize) -> Result<Config> {
    ConfigBuilder::new()
        .n_estimators(n_estimators)
        .max_depth(3)
        .learning_rate(0.5)
        .build()
}

/// Macro for creating test data quickly
#[macro_export]
macro_rules! create_test_data {
    (binary, $samples:expr, $features:expr) => {{
        let features = common::create_test_features_binary($samples, $features);
        let labels = common::create_test_labels_binary(&features);
        (features, labels)
    }};

    (separable, $samples:expr) => {{
        common::create_separable_data($samples)
    }};
}
