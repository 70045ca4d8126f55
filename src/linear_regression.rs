//! Multi-output linear regression trained by batch gradient descent.
//!
//! Shapes used throughout:
//! - N: number of training samples
//! - M: number of features
//! - K: number of samples to predict
//! - D: number of output dimensions

use log::{debug, log_enabled, trace, warn, Level};

use crate::config::RegressionConfig;
use crate::error::{Error, Result};
use crate::operation::{add, matrix_dims, multiply, scale, subtract, transpose};
use crate::tensor::Tensor;

const LOSS_LOG_INTERVAL: usize = 1000;

/// Least-squares fit of `y = X W + b`.
///
/// Parameters start at zero and are only changed by [`fit`](Self::fit).
/// The model is not `Clone`; it is the single owner of its weights and bias.
///
/// ```
/// use linreg_rs::{LinearRegression, Tensor};
///
/// let x = Tensor::from_vec(&[4, 1], vec![0.0, 1.0, 2.0, 3.0]).unwrap();
/// let y = Tensor::from_vec(&[4, 1], vec![1.0, 3.0, 5.0, 7.0]).unwrap();
///
/// let mut model = LinearRegression::new(1, 1, 0.05, 2000).unwrap();
/// model.fit(&x, &y).unwrap();
///
/// let pred = model.predict(&x).unwrap();
/// assert!((pred[[3, 0]] - 7.0).abs() < 1e-3);
/// ```
#[derive(Debug)]
pub struct LinearRegression {
    input_dim: usize,
    output_dim: usize,
    learning_rate: f64,
    iterations: usize,
    // [M, D]
    weights: Tensor<f64>,
    // [1, D]
    bias: Tensor<f64>,
}

impl LinearRegression {
    /// # Errors
    ///
    /// [`Error::Shape`] if a dimension is zero, [`Error::InvalidHyperparameter`]
    /// if `learning_rate` is not finite and positive.
    pub fn new(
        input_dim: usize,
        output_dim: usize,
        learning_rate: f64,
        iterations: usize,
    ) -> Result<Self> {
        let config = RegressionConfig::new(input_dim, output_dim)
            .with_learning_rate(learning_rate)
            .with_iterations(iterations);
        Self::from_config(&config)
    }

    pub fn from_config(config: &RegressionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            input_dim: config.input_dim,
            output_dim: config.output_dim,
            learning_rate: config.learning_rate,
            iterations: config.iterations,
            weights: Tensor::new(&[config.input_dim, config.output_dim])?,
            bias: Tensor::new(&[1, config.output_dim])?,
        })
    }

    pub fn weights(&self) -> &Tensor<f64> {
        &self.weights
    }

    pub fn bias(&self) -> &Tensor<f64> {
        &self.bias
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Runs `iterations` steps of batch gradient descent on the mean squared
    /// error of `x` (`[N, M]`) against `y` (`[N, D]`).
    ///
    /// Every shape is checked before the first step. Training works on copies
    /// of the parameters and only stores them once all steps are done, so on
    /// error the model is unchanged.
    pub fn fit(&mut self, x: &Tensor<f64>, y: &Tensor<f64>) -> Result<()> {
        let (n, m) = matrix_dims("fit", x)?;
        let (n_targets, d) = matrix_dims("fit", y)?;

        if self.weights.shape() != [m, d] {
            return Err(shape_mismatch(format!(
                "weights shape mismatch: model has {:?}, data needs [{m}, {d}]",
                self.weights.shape()
            )));
        }
        if self.bias.shape() != [1, d] {
            return Err(shape_mismatch(format!(
                "bias shape mismatch: model has {:?}, data needs [1, {d}]",
                self.bias.shape()
            )));
        }
        if n_targets != n {
            return Err(shape_mismatch(format!(
                "sample count mismatch: x has {n} rows, y has {n_targets}"
            )));
        }

        debug!(
            "fitting {n} samples, {m} features, {d} outputs for {} iterations (lr={})",
            self.iterations, self.learning_rate
        );

        // (1, N) x (N, D) sums the residuals over samples
        let ones_row = Tensor::full(&[1, n], 1.0)?;
        let xt = transpose(x)?;
        let grad_scale = 2.0 / n as f64;

        let mut weights = self.weights.clone();
        let mut bias = self.bias.clone();
        for iter in 0..self.iterations {
            // (N, M) x (M, D) + (1, D) tiled to (N, D)
            let predictions = add(&multiply(x, &weights)?, &tile_rows(&bias, n)?)?;
            let diff = subtract(&predictions, y)?;

            // (M, N) x (N, D) -> (M, D)
            let weight_gradients = scale(&multiply(&xt, &diff)?, grad_scale);
            // (1, N) x (N, D) -> (1, D)
            let bias_gradients = scale(&multiply(&ones_row, &diff)?, grad_scale);

            weights = subtract(&weights, &scale(&weight_gradients, self.learning_rate))?;
            bias = subtract(&bias, &scale(&bias_gradients, self.learning_rate))?;

            if log_enabled!(Level::Trace) && (iter + 1) % LOSS_LOG_INTERVAL == 0 {
                trace!("iteration {}: mse {:.6}", iter + 1, mean_square(&diff));
            }
        }

        self.weights = weights;
        self.bias = bias;
        debug!("fit finished after {} iterations", self.iterations);
        Ok(())
    }

    /// Applies the learned map to `x` (`[K, M]`), returning `[K, D]`.
    pub fn predict(&self, x: &Tensor<f64>) -> Result<Tensor<f64>> {
        let (k, m) = matrix_dims("predict", x)?;
        if m != self.input_dim {
            return Err(shape_mismatch(format!(
                "feature dimension mismatch: model expects {} features, got {m}",
                self.input_dim
            )));
        }
        let d = self.output_dim;
        if self.bias.shape() != [1, d] {
            return Err(shape_mismatch(format!(
                "bias shape mismatch: model has {:?}, expected [1, {d}]",
                self.bias.shape()
            )));
        }

        add(&multiply(x, &self.weights)?, &tile_rows(&self.bias, k)?)
    }

    /// Mean squared error of the predictions for `x` against `y`, averaged
    /// over every entry.
    pub fn mse(&self, x: &Tensor<f64>, y: &Tensor<f64>) -> Result<f64> {
        let diff = subtract(&self.predict(x)?, y)?;
        Ok(mean_square(&diff))
    }
}

fn shape_mismatch(msg: String) -> Error {
    warn!("{msg}");
    Error::Shape(msg)
}

/// Repeats a `[1, D]` row `n` times.
fn tile_rows(row: &Tensor<f64>, n: usize) -> Result<Tensor<f64>> {
    let (_, d) = matrix_dims("tile_rows", row)?;
    let mut tiled = Tensor::new(&[n, d])?;
    for i in 0..n {
        for j in 0..d {
            tiled.set(&[i, j], *row.get(&[0, j])?)?;
        }
    }
    Ok(tiled)
}

fn mean_square(t: &Tensor<f64>) -> f64 {
    t.iter().map(|v| v * v).sum::<f64>() / t.size() as f64
}
