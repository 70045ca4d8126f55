use std::ops::{Index, IndexMut};

use ndarray::{ArrayD, ArrayViewD, IxDyn, LinalgScalar};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dense, fixed-shape numeric container.
///
/// Elements live in a single row-major buffer (an `ndarray::ArrayD`), so a
/// multi-index maps to a flat offset through the strides
/// `stride[k] = product(shape[k + 1..])`. The shape never changes after
/// construction; only the element values do.
///
/// ```
/// use linreg_rs::Tensor;
///
/// let mut t = Tensor::<i32>::new(&[2, 2]).unwrap();
/// t.fill(5);
/// assert_eq!(*t.get(&[1, 0]).unwrap(), 5);
///
/// t.set_data(vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(t[[0, 1]], 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    into = "TensorData<T>",
    try_from = "TensorData<T>",
    bound(serialize = "T: Clone + Serialize", deserialize = "T: Clone + Deserialize<'de>")
)]
pub struct Tensor<T> {
    data: ArrayD<T>, // row-major, len == size
    size: usize,
}

/// Serialized form of a [`Tensor`]: the shape plus the row-major elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorData<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

impl<T: LinalgScalar> Tensor<T> {
    /// Allocates a zero-filled tensor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if `shape` is empty or has a zero dimension.
    pub fn new(shape: &[usize]) -> Result<Self> {
        Self::full(shape, T::zero())
    }
}

impl<T: Clone> Tensor<T> {
    /// Allocates a tensor with every element set to `value`.
    pub fn full(shape: &[usize], value: T) -> Result<Self> {
        element_count(shape)?;
        Ok(Self::from_array(ArrayD::from_elem(IxDyn(shape), value)))
    }

    /// Builds a tensor from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if the shape is invalid or `data.len()` is not
    /// the product of `shape`.
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        let size = element_count(shape)?;
        if data.len() != size {
            return Err(Error::shape(format!(
                "data length {} does not match shape {:?} ({} elements)",
                data.len(),
                shape,
                size
            )));
        }
        let data = ArrayD::from_shape_vec(IxDyn(shape), data)
            .map_err(|e| Error::shape(e.to_string()))?;
        Ok(Self::from_array(data))
    }

    /// Replaces every element, keeping the shape.
    ///
    /// On error the tensor is left untouched.
    pub fn set_data(&mut self, data: Vec<T>) -> Result<()> {
        if data.len() != self.size {
            return Err(Error::shape(format!(
                "set_data got {} elements, tensor of shape {:?} holds {}",
                data.len(),
                self.shape(),
                self.size
            )));
        }
        self.data = ArrayD::from_shape_vec(self.data.raw_dim(), data)
            .map_err(|e| Error::shape(e.to_string()))?;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Writes `value` at `index`.
    pub fn set(&mut self, index: &[usize], value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Copies the elements out in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }
}

impl<T> Tensor<T> {
    /// Wraps an array produced by an operation. The array's shape is taken
    /// as-is, so callers only pass arrays built from already-checked shapes.
    pub(crate) fn from_array(data: ArrayD<T>) -> Self {
        let size = data.len();
        Tensor { data, size }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Total number of elements. Cached at construction.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Row-major strides, in elements.
    pub fn strides(&self) -> Vec<usize> {
        row_major_strides(self.shape())
    }

    /// Flat row-major offset of `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Index`] if `index` does not have one coordinate per
    /// axis or a coordinate is out of bounds.
    pub fn offset(&self, index: &[usize]) -> Result<usize> {
        self.check_index(index)?;
        Ok(index
            .iter()
            .zip(self.strides())
            .map(|(&i, stride)| i * stride)
            .sum())
    }

    pub fn get(&self, index: &[usize]) -> Result<&T> {
        self.check_index(index)?;
        Ok(&self.data[IxDyn(index)])
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        self.check_index(index)?;
        Ok(&mut self.data[IxDyn(index)])
    }

    /// Iterates over the elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }

    /// Borrows the underlying storage as an `ndarray` view.
    pub fn as_array(&self) -> ArrayViewD<'_, T> {
        self.data.view()
    }

    fn check_index(&self, index: &[usize]) -> Result<()> {
        if index.len() != self.rank() {
            return Err(Error::index(format!(
                "expected {} coordinates for shape {:?}, got {}",
                self.rank(),
                self.shape(),
                index.len()
            )));
        }
        for (axis, (&i, &dim)) in index.iter().zip(self.shape()).enumerate() {
            if i >= dim {
                return Err(Error::index(format!(
                    "coordinate {i} out of bounds for axis {axis} of size {dim}"
                )));
            }
        }
        Ok(())
    }
}

/// Panics on a bad index; use [`Tensor::get`] for the fallible form.
impl<T, const N: usize> Index<[usize; N]> for Tensor<T> {
    type Output = T;

    fn index(&self, index: [usize; N]) -> &T {
        match self.get(&index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for Tensor<T> {
    fn index_mut(&mut self, index: [usize; N]) -> &mut T {
        match self.get_mut(&index) {
            Ok(value) => value,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T: Clone> From<Tensor<T>> for TensorData<T> {
    fn from(tensor: Tensor<T>) -> Self {
        let shape = tensor.shape().to_vec();
        let data = if tensor.data.is_standard_layout() {
            tensor.data.into_raw_vec()
        } else {
            // into_raw_vec keeps memory order, which is only row-major for
            // standard layout
            tensor
                .data
                .as_standard_layout()
                .into_owned()
                .into_raw_vec()
        };
        TensorData { shape, data }
    }
}

impl<T: Clone> TryFrom<TensorData<T>> for Tensor<T> {
    type Error = Error;

    fn try_from(raw: TensorData<T>) -> Result<Self> {
        Tensor::from_vec(&raw.shape, raw.data)
    }
}

/// Validates `shape` and returns its element count.
fn element_count(shape: &[usize]) -> Result<usize> {
    if shape.is_empty() {
        return Err(Error::shape("tensor rank must be at least 1"));
    }
    if let Some(axis) = shape.iter().position(|&dim| dim == 0) {
        return Err(Error::shape(format!(
            "dimension {axis} of shape {shape:?} is zero"
        )));
    }
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .filter(|&count| count <= isize::MAX as usize)
        .ok_or_else(|| Error::shape(format!("element count of shape {shape:?} overflows")))
}

fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for k in (0..shape.len().saturating_sub(1)).rev() {
        strides[k] = strides[k + 1] * shape[k + 1];
    }
    strides
}
