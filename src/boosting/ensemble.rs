//! Fitted tree ensemble and prediction.

use crate::boosting::history::TrainingHistory;
use crate::boosting::objective::sigmoid;
use crate::config::Config;
use crate::core::constants::DEFAULT_DECISION_THRESHOLD;
use crate::core::error::Result;
use crate::core::types::{ClassLabel, ImportanceType, PredictionInit, Score};
use crate::dataset::utils::check_prediction_input;
use crate::tree::{Tree, TreeExport};
use ndarray::{Array1, ArrayView2};
use std::fmt;

/// Ordered trees plus the hyperparameters they were fitted with.
///
/// Prediction starts every row at [`Ensemble::init_raw_score`], adds
/// `learning_rate` times the output of every tree in fit order and maps the
/// sum through the sigmoid.
#[derive(Debug, Clone)]
pub struct Ensemble {
    trees: Vec<Tree>,
    config: Config,
    num_features: usize,
    history: TrainingHistory,
}

impl Ensemble {
    /// Assembles a fitted model.
    pub fn new(trees: Vec<Tree>, config: Config, num_features: usize, history: TrainingHistory) -> Self {
        Ensemble {
            trees,
            config,
            num_features,
            history,
        }
    }

    /// Trees in fit order.
    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Get the tree at `index`.
    pub fn tree(&self, index: usize) -> Option<&Tree> {
        self.trees.get(index)
    }

    /// Number of trees.
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    /// Hyperparameters used for fitting.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of feature columns seen during fitting.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Per-round training diagnostics.
    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    /// Raw score every prediction starts from.
    pub fn init_raw_score(&self) -> Score {
        match self.config.prediction_init {
            PredictionInit::BaseScore => self.config.base_score,
            PredictionInit::LogOdds => self.config.initial_log_odds(),
        }
    }

    /// Raw (log-odds scale) scores for every row.
    pub fn predict_raw(&self, features: &ArrayView2<'_, f64>) -> Result<Array1<Score>> {
        check_prediction_input(features, self.num_features)?;

        let mut raw = Array1::from_elem(features.nrows(), self.init_raw_score());
        for tree in &self.trees {
            raw.scaled_add(self.config.learning_rate, &tree.predict(features)?);
        }
        Ok(raw)
    }

    /// Probability of the positive class for every row.
    pub fn predict_proba(&self, features: &ArrayView2<'_, f64>) -> Result<Array1<Score>> {
        Ok(self.predict_raw(features)?.mapv_into(sigmoid))
    }

    /// Class label for every row: 1 when the probability exceeds 0.5.
    pub fn predict(&self, features: &ArrayView2<'_, f64>) -> Result<Array1<ClassLabel>> {
        Ok(self
            .predict_proba(features)?
            .mapv(|p| ClassLabel::from(p > DEFAULT_DECISION_THRESHOLD)))
    }

    /// Probabilities after each prefix of the ensemble: element `i` uses the
    /// first `i + 1` trees.
    pub fn staged_predict_proba(&self, features: &ArrayView2<'_, f64>) -> Result<Vec<Array1<Score>>> {
        check_prediction_input(features, self.num_features)?;

        let mut raw = Array1::from_elem(features.nrows(), self.init_raw_score());
        let mut stages = Vec::with_capacity(self.trees.len());
        for tree in &self.trees {
            raw.scaled_add(self.config.learning_rate, &tree.predict(features)?);
            stages.push(raw.mapv(sigmoid));
        }
        Ok(stages)
    }

    /// Importance summed over all trees.
    pub fn feature_importance(&self, importance_type: ImportanceType) -> Array1<f64> {
        let mut importance = Array1::zeros(self.num_features);
        for tree in &self.trees {
            tree.accumulate_importance(&mut importance, importance_type);
        }
        importance
    }

    /// Flat node descriptors for every tree, in fit order.
    pub fn export_trees(&self) -> Vec<TreeExport> {
        self.trees
            .iter()
            .enumerate()
            .map(|(tree_index, tree)| TreeExport {
                tree_index,
                nodes: tree.export_nodes(),
            })
            .collect()
    }

    /// Serializes [`Ensemble::export_trees`] to pretty-printed JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&self.export_trees())?)
    }
}

impl fmt::Display for Ensemble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ensemble:")?;
        writeln!(f, "  Trees: {}", self.trees.len())?;
        writeln!(f, "  Features: {}", self.num_features)?;
        writeln!(f, "  Learning rate: {}", self.config.learning_rate)?;
        write!(f, "  Prediction init: {}", self.config.prediction_init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Node, TreeParams};
    use approx::assert_relative_eq;
    use ndarray::array;

    fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> Tree {
        Tree::new(
            Node::split(feature, threshold, 1.0, Node::Leaf(left), Node::Leaf(right)),
            TreeParams {
                max_depth: 1,
                reg_lambda: 0.0,
                prune_gamma: 0.0,
            },
        )
    }

    fn ensemble(prediction_init: PredictionInit) -> Ensemble {
        let config = Config {
            learning_rate: 0.5,
            base_score: 0.25,
            prediction_init,
            ..Config::default()
        };
        Ensemble::new(
            vec![stump(0, 2.5, -2.0, 2.0), stump(1, 0.0, 1.0, -1.0)],
            config,
            2,
            TrainingHistory::default(),
        )
    }

    #[test]
    fn test_predict_raw_sums_every_tree() {
        let model = ensemble(PredictionInit::BaseScore);
        let features = array![[1.0, -1.0], [3.0, 1.0]];
        let raw = model.predict_raw(&features.view()).unwrap();

        assert_relative_eq!(raw[0], 0.25 - 1.0 + 0.5, epsilon = 1e-12);
        assert_relative_eq!(raw[1], 0.25 + 1.0 - 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_log_odds_init() {
        let model = ensemble(PredictionInit::LogOdds);
        assert_relative_eq!(model.init_raw_score(), (1.0_f64 / 3.0).ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_predict_labels() {
        let model = ensemble(PredictionInit::BaseScore);
        let features = array![[1.0, 1.0], [3.0, -1.0]];
        let proba = model.predict_proba(&features.view()).unwrap();
        let labels = model.predict(&features.view()).unwrap();

        assert!(proba[0] < 0.5 && proba[1] > 0.5);
        assert_eq!(labels, array![0u8, 1]);
    }

    #[test]
    fn test_staged_predict_proba() {
        let model = ensemble(PredictionInit::BaseScore);
        let features = array![[1.0, -1.0]];
        let stages = model.staged_predict_proba(&features.view()).unwrap();

        assert_eq!(stages.len(), 2);
        assert_relative_eq!(stages[0][0], sigmoid(0.25 - 1.0), epsilon = 1e-12);
        let last = model.predict_proba(&features.view()).unwrap();
        assert_relative_eq!(stages[1][0], last[0], epsilon = 1e-12);
    }

    #[test]
    fn test_column_mismatch_rejected() {
        let model = ensemble(PredictionInit::BaseScore);
        let features = array![[1.0, 2.0, 3.0]];
        assert!(model.predict(&features.view()).unwrap_err().is_invalid_input());
        assert!(model.staged_predict_proba(&features.view()).is_err());
    }

    #[test]
    fn test_feature_importance_and_export() {
        let model = ensemble(PredictionInit::BaseScore);
        assert_eq!(model.feature_importance(ImportanceType::Split), array![1.0, 1.0]);

        let exports = model.export_trees();
        assert_eq!(exports.len(), 2);
        assert_eq!(exports[1].tree_index, 1);
        assert_eq!(exports[1].nodes.len(), 3);

        let json = model.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert!(model.to_string().contains("Trees: 2"));
    }
}
