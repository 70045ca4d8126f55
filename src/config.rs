use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_learning_rate() -> f64 {
    0.01
}

fn default_iterations() -> usize {
    1000
}

/// Hyperparameters of a [`LinearRegression`](crate::LinearRegression).
///
/// Deserializable from any serde format; `learning_rate` and `iterations`
/// fall back to `0.01` and `1000` when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionConfig {
    /// Number of features (M).
    pub input_dim: usize,
    /// Number of targets per sample (D).
    pub output_dim: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Gradient-descent steps per `fit` call.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

impl RegressionConfig {
    pub fn new(input_dim: usize, output_dim: usize) -> Self {
        Self {
            input_dim,
            output_dim,
            learning_rate: default_learning_rate(),
            iterations: default_iterations(),
        }
    }

    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// # Errors
    ///
    /// [`Error::Shape`] for a zero dimension, [`Error::InvalidHyperparameter`]
    /// for a learning rate that is not finite and positive.
    pub fn validate(&self) -> Result<()> {
        if self.input_dim == 0 || self.output_dim == 0 {
            return Err(Error::shape(format!(
                "model dimensions must be positive, got input_dim={} output_dim={}",
                self.input_dim, self.output_dim
            )));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidHyperparameter {
                param: "learning_rate".to_string(),
                value: self.learning_rate.to_string(),
                constraint: "a finite value > 0".to_string(),
            });
        }
        Ok(())
    }
}
