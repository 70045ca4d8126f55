//! Pure tensor operations.
//!
//! Every function borrows its inputs and returns a freshly allocated tensor.
//! Shape preconditions are checked before any work is done and reported as
//! [`Error::Shape`].

use ndarray::{Array2, ArrayView2, Ix2, LinalgScalar};

use crate::error::{Error, Result};
use crate::tensor::Tensor;

pub use crate::add::{add, subtract};

/// Multiplies every element of `a` by `k`.
pub fn scale<T: LinalgScalar>(a: &Tensor<T>, k: T) -> Tensor<T> {
    Tensor::from_array(a.as_array().mapv(|x| x * k))
}

/// Swaps the two axes of a rank-2 tensor: `[r, c] -> [c, r]`.
pub fn transpose<T: LinalgScalar>(a: &Tensor<T>) -> Result<Tensor<T>> {
    let a = as_matrix("transpose", a)?;
    Ok(Tensor::from_array(
        a.t().as_standard_layout().into_owned().into_dyn(),
    ))
}

/// Matrix product of `[n, k]` and `[k, m]`, giving `[n, m]`.
///
/// Each output element is accumulated left to right over the inner axis,
/// starting from zero, so results are reproducible bit for bit.
///
/// # Errors
///
/// Returns [`Error::Shape`] if either operand is not rank 2 or the inner
/// dimensions differ.
pub fn multiply<T: LinalgScalar>(a: &Tensor<T>, b: &Tensor<T>) -> Result<Tensor<T>> {
    let a = as_matrix("multiply", a)?;
    let b = as_matrix("multiply", b)?;
    let (n, k) = a.dim();
    let (k2, m) = b.dim();
    if k != k2 {
        return Err(Error::shape(format!(
            "multiply inner dimensions differ: [{n}, {k}] x [{k2}, {m}]"
        )));
    }

    let mut out = Array2::<T>::zeros((n, m));
    for ((i, j), slot) in out.indexed_iter_mut() {
        let mut acc = T::zero();
        for t in 0..k {
            acc = acc + a[[i, t]] * b[[t, j]];
        }
        *slot = acc;
    }
    Ok(Tensor::from_array(out.into_dyn()))
}

/// `(rows, cols)` of a rank-2 tensor.
pub(crate) fn matrix_dims<T>(op: &str, t: &Tensor<T>) -> Result<(usize, usize)> {
    match *t.shape() {
        [rows, cols] => Ok((rows, cols)),
        _ => Err(Error::shape(format!(
            "{op} expects a rank-2 tensor, got shape {:?}",
            t.shape()
        ))),
    }
}

fn as_matrix<'a, T>(op: &str, t: &'a Tensor<T>) -> Result<ArrayView2<'a, T>> {
    matrix_dims(op, t)?;
    t.as_array()
        .into_dimensionality::<Ix2>()
        .map_err(|e| Error::shape(format!("{op}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: usize, cols: usize, data: Vec<f64>) -> Tensor<f64> {
        Tensor::from_vec(&[rows, cols], data).unwrap()
    }

    #[test]
    fn test_scale() {
        let a = matrix(1, 3, vec![1.0, -2.0, 0.5]);
        let s = scale(&a, 4.0);
        assert_eq!(s.shape(), a.shape());
        assert_eq!(s.to_vec(), vec![4.0, -8.0, 2.0]);
        assert_eq!(a.to_vec(), vec![1.0, -2.0, 0.5]);
    }

    #[test]
    fn test_transpose_values() {
        let a = matrix(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = transpose(&a).unwrap();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.to_vec(), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        assert_eq!(t[[2, 1]], 6.0);
    }

    #[test]
    fn test_transpose_rejects_other_ranks() {
        let v = Tensor::<f64>::new(&[4]).unwrap();
        let cube = Tensor::<f64>::new(&[2, 2, 2]).unwrap();
        assert!(transpose(&v).unwrap_err().is_shape());
        assert!(transpose(&cube).unwrap_err().is_shape());
    }

    #[test]
    fn test_multiply_values() {
        let a = matrix(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = matrix(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = multiply(&a, &b).unwrap();
        assert_eq!(c.shape(), &[2, 2]);
        assert_eq!(c.to_vec(), vec![58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn test_multiply_row_vector_sums_columns() {
        let ones = Tensor::full(&[1, 3], 1.0).unwrap();
        let m = matrix(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(multiply(&ones, &m).unwrap().to_vec(), vec![9.0, 12.0]);
    }

    #[test]
    fn test_multiply_shape_errors() {
        let a = matrix(2, 3, vec![0.0; 6]);
        let b = matrix(2, 3, vec![0.0; 6]);
        let v = Tensor::<f64>::new(&[3]).unwrap();
        assert!(multiply(&a, &b).unwrap_err().is_shape());
        assert!(multiply(&a, &v).unwrap_err().is_shape());
        assert!(multiply(&v, &a).unwrap_err().is_shape());
    }
}
