//! Dense tensors with shape-checked operations, and a linear regression
//! model trained by batch gradient descent on top of them.

mod add;
pub mod config;
pub mod error;
pub mod linear_regression;
pub mod operation;
pub mod tensor;

pub use config::RegressionConfig;
pub use error::{Error, Result};
pub use linear_regression::LinearRegression;
pub use tensor::{Tensor, TensorData};
