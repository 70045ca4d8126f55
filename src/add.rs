use std::ops::{Add, Sub};

use ndarray::LinalgScalar;

use crate::error::{Error, Result};
use crate::tensor::Tensor;

fn check_same_shape<T>(op: &str, a: &Tensor<T>, b: &Tensor<T>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::shape(format!(
            "{op} needs identical shapes, got {:?} and {:?}",
            a.shape(),
            b.shape()
        )));
    }
    Ok(())
}

/// Element-wise `a + b`. Shapes must match exactly; nothing is broadcast.
pub fn add<T: LinalgScalar>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>> {
    check_same_shape("add", a, b)?;
    Ok(Tensor::from_array(&a.as_array() + &b.as_array()))
}

/// Element-wise `a - b`. Shapes must match exactly; nothing is broadcast.
pub fn subtract<T: LinalgScalar>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>> {
    check_same_shape("subtract", a, b)?;
    Ok(Tensor::from_array(&a.as_array() - &b.as_array()))
}

impl<'a, T: LinalgScalar> Add<&'a Tensor<T>> for &'a Tensor<T> {
    type Output = Result<Tensor<T>>;

    fn add(self, rhs: &'a Tensor<T>) -> Result<Tensor<T>> {
        add(self, rhs)
    }
}

impl<'a, T: LinalgScalar> Sub<&'a Tensor<T>> for &'a Tensor<T> {
    type Output = Result<Tensor<T>>;

    fn sub(self, rhs: &'a Tensor<T>) -> Result<Tensor<T>> {
        subtract(self, rhs)
    }
}
