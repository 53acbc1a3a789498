//! # xgb-classifier
//!
//! A gradient-boosted decision tree classifier for binary targets, grown
//! with exact greedy split search.
//!
//! ## Features
//!
//! - **Exact splits**: every midpoint between consecutive distinct feature
//!   values is evaluated, no histograms or quantile sketches.
//! - **Second-order objective**: split gains and leaf values use the
//!   residual sum and the `p (1 - p)` hessian weight sum with L2
//!   regularization and a minimum-gain pruning threshold.
//! - **Deterministic**: sequential and rayon feature-parallel split search
//!   produce identical trees.
//! - **Inspectable**: fitted trees export to a flat JSON node list and keep
//!   a per-round training history.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use xgb_classifier::{ConfigBuilder, XGBClassifier};
//! use ndarray::{array, Array1};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let features = array![[1.0], [2.0], [3.0], [4.0]];
//! let labels: Array1<f64> = array![0.0, 0.0, 1.0, 1.0];
//!
//! let config = ConfigBuilder::new()
//!     .n_estimators(10)
//!     .max_depth(3)
//!     .learning_rate(0.5)
//!     .build()?;
//!
//! let mut model = XGBClassifier::new(config);
//! model.fit(&features, &labels)?;
//!
//! let probabilities = model.predict_proba(&features)?;
//! let classes = model.predict(&features)?;
//! println!("{:?} {:?}", probabilities, classes);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Fundamental types, constants, error handling, and trait abstractions
//! - [`config`]: Hyperparameters, validation, file and environment loading
//! - [`dataset`]: Validated in-memory training data
//! - [`tree`]: Split search, tree growth, prediction and export
//! - [`boosting`]: The boosting loop and the fitted ensemble
//! - [`metrics`]: Accuracy, log-loss and squared error

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Dataset management module
pub mod dataset;

// Tree learning module
pub mod tree;

// Boosting module
pub mod boosting;

// Metrics evaluation module
pub mod metrics;

// Re-export core functionality for convenience
pub use self::core::{
    constants::*,
    error::{Result, XGBError},
    traits::*,
    types::*,
};

pub use self::config::{Config, ConfigBuilder};
pub use self::dataset::{Dataset, DatasetInfo};
pub use self::tree::{NodeDescriptor, Tree, TreeBuilder, TreeExport};
pub use self::boosting::{fit, predict, Ensemble, TrainingHistory, GBDT};
pub use self::metrics::{evaluate_binary_classification, ClassificationReport};

// Version information
pub use self::core::constants::XGB_CLASSIFIER_VERSION as VERSION;

use ndarray::{Array1, Array2};

/// Initialize the library: installs the `env_logger` backend for the `log`
/// facade. Calling it again is harmless.
///
/// # Examples
///
/// ```rust
/// fn main() -> xgb_classifier::Result<()> {
///     xgb_classifier::init()?;
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    self::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    self::core::is_core_initialized()
}

/// Binary classifier with a fit / predict interface.
#[derive(Debug, Clone)]
pub struct XGBClassifier {
    config: Config,
    model: Option<Ensemble>,
}

impl XGBClassifier {
    /// Create a new classifier with the given configuration.
    pub fn new(config: Config) -> Self {
        XGBClassifier {
            config,
            model: None,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fit on a feature matrix and 0/1 labels, replacing any previous model.
    pub fn fit(&mut self, features: &Array2<f64>, labels: &Array1<Label>) -> Result<()> {
        let model = fit(&features.view(), &labels.view(), &self.config)?;
        self.model = Some(model);
        Ok(())
    }

    /// Fit on an already validated dataset.
    pub fn fit_dataset(&mut self, dataset: &Dataset) -> Result<()> {
        let model = GBDT::new(self.config.clone())?.train(dataset)?;
        self.model = Some(model);
        Ok(())
    }

    /// The fitted model, if any.
    pub fn model(&self) -> Option<&Ensemble> {
        self.model.as_ref()
    }

    /// Returns true once [`XGBClassifier::fit`] has succeeded.
    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    fn fitted(&self) -> Result<&Ensemble> {
        self.model
            .as_ref()
            .ok_or_else(|| XGBError::prediction("model has not been fitted"))
    }

    /// Predict class labels.
    pub fn predict(&self, features: &Array2<f64>) -> Result<Array1<ClassLabel>> {
        self.fitted()?.predict(&features.view())
    }

    /// Predict positive-class probabilities.
    pub fn predict_proba(&self, features: &Array2<f64>) -> Result<Array1<Score>> {
        self.fitted()?.predict_proba(&features.view())
    }

    /// Accuracy of the predicted labels against `labels`.
    pub fn score(&self, features: &Array2<f64>, labels: &Array1<Label>) -> Result<f64> {
        let predictions = self.predict(features)?;
        metrics::accuracy(&predictions.view(), &labels.view())
    }

    /// Gain-based feature importance of the fitted model.
    pub fn feature_importance(&self, importance_type: ImportanceType) -> Result<Array1<f64>> {
        Ok(self.fitted()?.feature_importance(importance_type))
    }
}

impl Default for XGBClassifier {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
