use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
    RankMismatch { expected: usize, got: usize },
    IndexOutOfBounds { axis: usize, index: usize, size: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape dimensions overflow when multiplied"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} elements, got {got}")
            }
            TensorError::RankMismatch { expected, got } => {
                write!(f, "rank mismatch: shape has rank {expected}, index has rank {got}")
            }
            TensorError::IndexOutOfBounds { axis, index, size } => {
                write!(f, "index {index} out of bounds for axis {axis} of size {size}")
            }
        }
    }
}

impl std::error::Error for TensorError {}

/// Number of elements described by `shape`, or `ShapeOverflow`.
pub fn element_count(shape: &[usize]) -> Result<usize, TensorError> {
    shape
        .iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .ok_or(TensorError::ShapeOverflow)
}

/// Row-major strides for `shape`.
///
/// The last axis has stride 1. Callers are expected to have validated the
/// shape with [`element_count`] first; strides of an overflowing shape saturate.
pub fn strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1].saturating_mul(shape[axis + 1]);
    }
    strides
}

/// Flat row-major offset of `index` inside a buffer of the given `shape`.
pub fn flat_index(shape: &[usize], index: &[usize]) -> Result<usize, TensorError> {
    if shape.len() != index.len() {
        return Err(TensorError::RankMismatch {
            expected: shape.len(),
            got: index.len(),
        });
    }
    element_count(shape)?;

    let mut offset = 0usize;
    for (axis, (&i, &size)) in index.iter().zip(shape).enumerate() {
        if i >= size {
            return Err(TensorError::IndexOutOfBounds { axis, index: i, size });
        }
        offset = offset * size + i;
    }
    Ok(offset)
}

/// Flat buffer with an explicit shape.
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("len", &self.data.len())
            .finish()
    }
}

impl<T> Tensor<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let product = element_count(&shape)?;
        if product != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected: product,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn flat_index(&self, index: &[usize]) -> Result<usize, TensorError> {
        flat_index(&self.shape, index)
    }

    pub fn get(&self, index: &[usize]) -> Result<&T, TensorError> {
        let offset = self.flat_index(index)?;
        Ok(&self.data[offset])
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Result<&mut T, TensorError> {
        let offset = self.flat_index(index)?;
        Ok(&mut self.data[offset])
    }

    /// Split into shape and buffer.
    pub fn into_parts(self) -> (Vec<usize>, Vec<T>) {
        (self.shape, self.data)
    }
}

impl<T: Default + Clone> Tensor<T> {
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError> {
        let product = element_count(&shape)?;
        let data = vec![T::default(); product];
        Ok(Self { shape, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides_row_major() {
        assert_eq!(strides(&[1, 3, 2, 4]), vec![24, 8, 4, 1]);
        assert_eq!(strides(&[]), Vec::<usize>::new());
    }

    #[test]
    fn test_element_count_overflow() {
        assert_eq!(element_count(&[usize::MAX, 2]), Err(TensorError::ShapeOverflow));
    }

    #[test]
    fn test_flat_index_matches_strides() {
        let shape = [1, 3, 2, 4];
        let s = strides(&shape);
        let index = [0, 2, 1, 3];
        let expected: usize = index.iter().zip(&s).map(|(i, s)| i * s).sum();
        assert_eq!(flat_index(&shape, &index).unwrap(), expected);
    }
}
