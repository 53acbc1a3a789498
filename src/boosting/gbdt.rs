//! Gradient boosting loop.

use crate::boosting::ensemble::Ensemble;
use crate::boosting::history::{RoundRecord, TrainingHistory};
use crate::boosting::objective::BinaryLogistic;
use crate::config::Config;
use crate::core::error::Result;
use crate::core::traits::ObjectiveFunction;
use crate::core::types::{Label, Score};
use crate::dataset::Dataset;
use crate::metrics::{binary_logloss, mean_squared_error};
use crate::tree::TreeBuilder;
use ndarray::{Array1, ArrayView1};

/// Gradient Boosting Decision Tree trainer.
///
/// Every round fits one tree to the residuals `y - p` weighted by
/// `p (1 - p)` at the current scores and adds `learning_rate` times its
/// output to the scores. Rounds always run to `n_estimators`.
#[derive(Debug)]
pub struct GBDT {
    config: Config,
    objective: Box<dyn ObjectiveFunction>,
    builder: TreeBuilder,
}

impl GBDT {
    /// Create a trainer after validating the configuration.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let builder = TreeBuilder::from_config(&config);
        Ok(GBDT {
            config,
            objective: Box::new(BinaryLogistic),
            builder,
        })
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the objective function
    pub fn objective(&self) -> &dyn ObjectiveFunction {
        self.objective.as_ref()
    }

    /// Fit `n_estimators` trees to `dataset`.
    pub fn train(&self, dataset: &Dataset) -> Result<Ensemble> {
        let features = dataset.features();
        let labels = dataset.labels();
        self.objective.validate_labels(&labels)?;

        let num_data = dataset.num_data();
        log::info!(
            "Training {} with {} rounds on {} rows x {} features",
            self.objective.name(),
            self.config.n_estimators,
            num_data,
            dataset.num_features()
        );

        let mut scores = Array1::from_elem(num_data, self.objective.init_score(self.config.base_score));
        let mut residuals: Array1<Score> = Array1::zeros(num_data);
        let mut hessians: Array1<Score> = Array1::zeros(num_data);

        let (mse, logloss) = self.evaluate(&scores, &labels)?;
        let mut history = TrainingHistory::new(mse, logloss);
        log::debug!("Initial: mean squared residual {:.6}, logloss {:.6}", mse, logloss);

        let mut trees = Vec::with_capacity(self.config.n_estimators);
        for round in 0..self.config.n_estimators {
            self.objective.compute_gradients(
                &scores.view(),
                &labels,
                &mut residuals.view_mut(),
                &mut hessians.view_mut(),
            )?;

            let tree = self
                .builder
                .build(&features, &residuals.view(), &hessians.view());
            let output = tree.predict(&features)?;
            scores.scaled_add(self.config.learning_rate, &output);

            let (mse, logloss) = self.evaluate(&scores, &labels)?;
            log::debug!(
                "Round {}: depth {}, {} leaves, mean squared residual {:.6}, logloss {:.6}",
                round,
                tree.depth(),
                tree.num_leaves(),
                mse,
                logloss
            );
            history.push(RoundRecord {
                round,
                mean_squared_residual: mse,
                logloss,
                tree_depth: tree.depth(),
                num_leaves: tree.num_leaves(),
            });
            trees.push(tree);
        }

        if let Some(last) = history.last() {
            log::info!(
                "Training finished: {} trees, final logloss {:.6}",
                trees.len(),
                last.logloss
            );
        }

        Ok(Ensemble::new(
            trees,
            self.config.clone(),
            dataset.num_features(),
            history,
        ))
    }

    /// Mean squared residual and log-loss of raw `scores`.
    fn evaluate(&self, scores: &Array1<Score>, labels: &ArrayView1<'_, Label>) -> Result<(f64, f64)> {
        let mut probabilities = scores.clone();
        self.objective
            .transform_predictions(&mut probabilities.view_mut());
        let mse = mean_squared_error(labels, &probabilities.view())?;
        let logloss = binary_logloss(&probabilities.view(), labels)?;
        Ok((mse, logloss))
    }
}
