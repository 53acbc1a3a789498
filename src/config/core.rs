//! Core configuration structure and builder.
//!
//! [`Config`] carries the six boosting hyperparameters plus two options
//! that change how work is scheduled or how prediction starts, never what
//! a tree looks like.

use crate::core::constants::*;
use crate::core::error::{Result, XGBError};
use crate::core::types::*;
use crate::config_error;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main configuration structure for training and prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of boosting rounds (trees in the ensemble)
    pub n_estimators: usize,
    /// Maximum depth of every tree; the root split is depth 1
    pub max_depth: usize,
    /// Shrinkage applied to every tree output
    pub learning_rate: f64,
    /// Minimum gain required to accept a split
    pub prune_gamma: f64,
    /// L2 regularization added to every hessian denominator
    pub reg_lambda: f64,
    /// Initial probability, strictly between 0 and 1
    pub base_score: f64,
    /// Raw score prediction starts from
    pub prediction_init: PredictionInit,
    /// Scan features on the rayon pool when searching for splits
    pub parallel_split_search: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            n_estimators: DEFAULT_N_ESTIMATORS,
            max_depth: DEFAULT_MAX_DEPTH,
            learning_rate: DEFAULT_LEARNING_RATE,
            prune_gamma: DEFAULT_PRUNE_GAMMA,
            reg_lambda: DEFAULT_REG_LAMBDA,
            base_score: DEFAULT_BASE_SCORE,
            prediction_init: DEFAULT_PREDICTION_INIT,
            parallel_split_search: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators < 1 {
            return Err(XGBError::invalid_parameter(
                "n_estimators",
                self.n_estimators.to_string(),
                "must be at least 1",
            ));
        }

        if self.max_depth < 1 {
            return Err(XGBError::invalid_parameter(
                "max_depth",
                self.max_depth.to_string(),
                "must be at least 1",
            ));
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(XGBError::invalid_parameter(
                "learning_rate",
                self.learning_rate.to_string(),
                "must be a finite value greater than 0.0",
            ));
        }

        if !self.prune_gamma.is_finite() || self.prune_gamma < 0.0 {
            return Err(XGBError::invalid_parameter(
                "prune_gamma",
                self.prune_gamma.to_string(),
                "must be a finite non-negative value",
            ));
        }

        if !self.reg_lambda.is_finite() || self.reg_lambda < 0.0 {
            return Err(XGBError::invalid_parameter(
                "reg_lambda",
                self.reg_lambda.to_string(),
                "must be a finite non-negative value",
            ));
        }

        // NaN fails both comparisons.
        if !(self.base_score > 0.0 && self.base_score < 1.0) {
            return Err(XGBError::invalid_parameter(
                "base_score",
                self.base_score.to_string(),
                "must be in range (0.0, 1.0)",
            ));
        }

        Ok(())
    }

    /// Set a single parameter from its string form.
    ///
    /// Unknown keys are logged and ignored; malformed values are errors.
    pub fn set_parameter(&mut self, key: &str, value: &str) -> Result<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| XGBError::config(format!("Invalid {}: {}", key, value)))
        }

        match key {
            "n_estimators" => self.n_estimators = parse(key, value)?,
            "max_depth" => self.max_depth = parse(key, value)?,
            "learning_rate" | "eta" => self.learning_rate = parse(key, value)?,
            "prune_gamma" | "gamma" => self.prune_gamma = parse(key, value)?,
            "reg_lambda" | "lambda" => self.reg_lambda = parse(key, value)?,
            "base_score" => self.base_score = parse(key, value)?,
            "parallel_split_search" => self.parallel_split_search = parse(key, value)?,
            "prediction_init" => {
                self.prediction_init = match value.trim() {
                    "base_score" => PredictionInit::BaseScore,
                    "log_odds" => PredictionInit::LogOdds,
                    _ => return Err(config_error!("Invalid prediction_init: {}", value)),
                };
            }
            _ => log::warn!("Unknown configuration parameter: {}", key),
        }

        Ok(())
    }

    /// Load configuration from a `.json` or `.toml` file.
    ///
    /// Missing keys fall back to their defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: Config = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content).map_err(|e| {
                XGBError::serialization(format!("Failed to parse TOML config: {}", e))
            })?,
            _ => {
                return Err(XGBError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self).map_err(|e| {
                XGBError::serialization(format!("Failed to serialize to TOML: {}", e))
            })?,
            _ => {
                return Err(XGBError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Load configuration from `XGB_*` environment variables on top of the defaults.
    pub fn load_from_environment() -> Result<Self> {
        let mut config = Config::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Apply every `XGB_<PARAMETER>` environment variable that is set.
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        for key in Self::parameter_names() {
            let var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Ok(value) = std::env::var(&var) {
                log::debug!("Overriding {} from {}", key, var);
                self.set_parameter(key, &value)?;
            }
        }

        self.validate()
    }

    /// Names accepted by [`Config::set_parameter`].
    pub fn parameter_names() -> [&'static str; 8] {
        [
            "n_estimators",
            "max_depth",
            "learning_rate",
            "prune_gamma",
            "reg_lambda",
            "base_score",
            "prediction_init",
            "parallel_split_search",
        ]
    }

    /// Raw score every training row starts from: the log-odds of `base_score`.
    pub fn initial_log_odds(&self) -> f64 {
        (self.base_score / (1.0 - self.base_score)).ln()
    }

    /// Get configuration as a parameter map (for debugging/serialization)
    pub fn as_parameter_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("n_estimators".to_string(), self.n_estimators.to_string());
        map.insert("max_depth".to_string(), self.max_depth.to_string());
        map.insert("learning_rate".to_string(), self.learning_rate.to_string());
        map.insert("prune_gamma".to_string(), self.prune_gamma.to_string());
        map.insert("reg_lambda".to_string(), self.reg_lambda.to_string());
        map.insert("base_score".to_string(), self.base_score.to_string());
        map.insert(
            "prediction_init".to_string(),
            self.prediction_init.to_string(),
        );
        map.insert(
            "parallel_split_search".to_string(),
            self.parallel_split_search.to_string(),
        );

        map
    }
}

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
    // (parameter, value, reason) for every rejected setter call
    validation_errors: Vec<(&'static str, String, &'static str)>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: Config::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the number of boosting rounds
    pub fn n_estimators(mut self, n_estimators: usize) -> Self {
        if n_estimators < 1 {
            self.reject("n_estimators", n_estimators, "must be at least 1");
        }
        self.config.n_estimators = n_estimators;
        self
    }

    /// Set the maximum tree depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        if depth < 1 {
            self.reject("max_depth", depth, "must be at least 1");
        }
        self.config.max_depth = depth;
        self
    }

    /// Set the learning rate
    pub fn learning_rate(mut self, rate: f64) -> Self {
        if !(rate > 0.0) {
            self.reject("learning_rate", rate, "must be greater than 0.0");
        }
        self.config.learning_rate = rate;
        self
    }

    /// Set the pruning threshold
    pub fn prune_gamma(mut self, gamma: f64) -> Self {
        if !(gamma >= 0.0) {
            self.reject("prune_gamma", gamma, "must be non-negative");
        }
        self.config.prune_gamma = gamma;
        self
    }

    /// Set the L2 regularization constant
    pub fn reg_lambda(mut self, lambda: f64) -> Self {
        if !(lambda >= 0.0) {
            self.reject("reg_lambda", lambda, "must be non-negative");
        }
        self.config.reg_lambda = lambda;
        self
    }

    /// Set the initial probability
    pub fn base_score(mut self, base_score: f64) -> Self {
        if !(base_score > 0.0 && base_score < 1.0) {
            self.reject("base_score", base_score, "must be in range (0.0, 1.0)");
        }
        self.config.base_score = base_score;
        self
    }

    /// Set where prediction starts accumulating tree outputs
    pub fn prediction_init(mut self, init: PredictionInit) -> Self {
        self.config.prediction_init = init;
        self
    }

    /// Enable or disable the feature-parallel split scan
    pub fn parallel_split_search(mut self, enabled: bool) -> Self {
        self.config.parallel_split_search = enabled;
        self
    }

    fn reject<V: ToString>(&mut self, parameter: &'static str, value: V, reason: &'static str) {
        self.validation_errors
            .push((parameter, value.to_string(), reason));
    }

    /// Build the configuration.
    ///
    /// Every out-of-domain value passed to a setter is reported in a single
    /// invalid-parameter error.
    pub fn build(self) -> Result<Config> {
        if !self.validation_errors.is_empty() {
            let parameters: Vec<&str> = self.validation_errors.iter().map(|e| e.0).collect();
            let values: Vec<&str> = self.validation_errors.iter().map(|e| e.1.as_str()).collect();
            let reasons: Vec<String> = self
                .validation_errors
                .iter()
                .map(|(parameter, _, reason)| format!("{} {}", parameter, reason))
                .collect();
            return Err(XGBError::invalid_parameter(
                parameters.join(", "),
                values.join(", "),
                reasons.join("; "),
            ));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.n_estimators, 10);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.prune_gamma, 0.0);
        assert_eq!(config.reg_lambda, 0.0);
        assert_eq!(config.base_score, 0.5);
        assert_eq!(config.prediction_init, PredictionInit::BaseScore);
        assert!(!config.parallel_split_search);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.learning_rate = 0.0;
        assert!(config.validate().unwrap_err().is_invalid_input());

        let mut config = Config::default();
        config.n_estimators = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.max_depth = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.prune_gamma = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.reg_lambda = f64::NAN;
        assert!(config.validate().is_err());

        for bad in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let mut config = Config::default();
            config.base_score = bad;
            assert!(config.validate().is_err(), "base_score {} accepted", bad);
        }
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .n_estimators(25)
            .max_depth(4)
            .learning_rate(0.3)
            .prune_gamma(0.1)
            .reg_lambda(1.0)
            .base_score(0.3)
            .prediction_init(PredictionInit::LogOdds)
            .parallel_split_search(true)
            .build()
            .unwrap();

        assert_eq!(config.n_estimators, 25);
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.learning_rate, 0.3);
        assert_eq!(config.prune_gamma, 0.1);
        assert_eq!(config.reg_lambda, 1.0);
        assert_eq!(config.base_score, 0.3);
        assert_eq!(config.prediction_init, PredictionInit::LogOdds);
        assert!(config.parallel_split_search);
    }

    #[test]
    fn test_config_builder_validation() {
        let result = ConfigBuilder::new()
            .learning_rate(-0.1)
            .base_score(1.0)
            .build();

        let err = result.unwrap_err();
        assert!(err.is_invalid_input());
        let message = err.to_string();
        assert!(message.contains("learning_rate"));
        assert!(message.contains("base_score"));
    }

    #[test]
    fn test_config_builder_single_rejection() {
        let err = ConfigBuilder::new().max_depth(0).build().unwrap_err();
        assert!(matches!(
            err,
            XGBError::InvalidParameter { ref parameter, ref value, .. }
                if parameter == "max_depth" && value == "0"
        ));
    }

    #[test]
    fn test_set_parameter() {
        let mut config = Config::default();
        config.set_parameter("eta", "0.25").unwrap();
        config.set_parameter("max_depth", " 5 ").unwrap();
        config.set_parameter("prediction_init", "log_odds").unwrap();
        config.set_parameter("not_a_parameter", "1").unwrap();

        assert_eq!(config.learning_rate, 0.25);
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.prediction_init, PredictionInit::LogOdds);
        assert!(config.set_parameter("n_estimators", "ten").is_err());
    }

    #[test]
    fn test_initial_log_odds() {
        let mut config = Config::default();
        assert_eq!(config.initial_log_odds(), 0.0);

        config.base_score = 0.8;
        assert!((config.initial_log_odds() - 4.0_f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::new()
            .n_estimators(7)
            .reg_lambda(2.0)
            .build()
            .unwrap();

        for name in ["config.json", "config.toml"] {
            let path = dir.path().join(name);
            config.save_to_file(&path).unwrap();
            let loaded = Config::load_from_file(&path).unwrap();
            assert_eq!(loaded, config);
        }

        let bad = dir.path().join("config.yaml");
        assert!(config.save_to_file(&bad).is_err());
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "n_estimators = 3\nlearning_rate = 0.1\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.n_estimators, 3);
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_invalid_config_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"base_score": 2.0}"#).unwrap();

        assert!(Config::load_from_file(&path).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_config_file_error_kinds() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert_eq!(Config::load_from_file(&missing).unwrap_err().category(), "io");

        let json = dir.path().join("broken.json");
        std::fs::write(&json, "{ n_estimators: ").unwrap();
        assert_eq!(Config::load_from_file(&json).unwrap_err().category(), "json");

        let toml = dir.path().join("broken.toml");
        std::fs::write(&toml, "n_estimators = = 3").unwrap();
        assert_eq!(
            Config::load_from_file(&toml).unwrap_err().category(),
            "serialization"
        );

        let unsupported = dir.path().join("config.yaml");
        std::fs::write(&unsupported, "n_estimators: 3").unwrap();
        assert_eq!(Config::load_from_file(&unsupported).unwrap_err().category(), "config");
    }

    #[test]
    fn test_environment_overrides() {
        std::env::set_var("XGB_REG_LAMBDA", "3.5");
        let config = Config::load_from_environment().unwrap();
        std::env::remove_var("XGB_REG_LAMBDA");

        assert_eq!(config.reg_lambda, 3.5);
    }

    #[test]
    fn test_config_parameter_map() {
        let map = Config::default().as_parameter_map();
        for key in Config::parameter_names() {
            assert!(map.contains_key(key), "missing {}", key);
        }
        assert_eq!(map.get("prediction_init").unwrap(), "base_score");
    }
}
