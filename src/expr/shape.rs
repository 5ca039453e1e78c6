//! Shape representation for arrays.
//!
//! Shapes are row-major like NumPy, and every declared array has at least one
//! dimension:
//! - `(n,)` or `[n]` is a vector of length n
//! - `(m, n)` or `[m, n]` is an m x n matrix
//!
//! Index sets are zero based, so dimension `d` of extent `n` is declared as
//! `0..n-1`.

use std::fmt;

use itertools::Itertools;

use crate::error::{Result, ZincError};

/// Shape of an array (row-major like NumPy).
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Create a vector shape.
    pub fn vector(n: usize) -> Self {
        Shape(vec![n])
    }

    /// Create a matrix shape.
    pub fn matrix(m: usize, n: usize) -> Self {
        Shape(vec![m, n])
    }

    /// Create a shape from dimensions.
    pub fn from_dims(dims: impl Into<Vec<usize>>) -> Self {
        Shape(dims.into())
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.0.iter().product::<usize>()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Get the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Extent of one dimension.
    pub fn extent(&self, dim: usize) -> Option<usize> {
        self.0.get(dim).copied()
    }

    /// Check that the shape can back a declared array.
    pub fn validate(&self) -> Result<()> {
        if self.0.is_empty() || self.0.contains(&0) {
            return Err(ZincError::InvalidShape(self.to_string()));
        }
        Ok(())
    }

    /// Index sets of the declaration, `0..2, 0..2` for a 3 x 3 array.
    pub fn index_sets(&self) -> String {
        self.0.iter().map(|d| format!("0..{}", d - 1)).join(", ")
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?})", self.0)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.len() == 1 {
            write!(f, "({},)", self.0[0])
        } else {
            write!(f, "({})", self.0.iter().join(", "))
        }
    }
}

// Conversion traits
impl From<usize> for Shape {
    fn from(n: usize) -> Self {
        Shape::vector(n)
    }
}

impl From<(usize,)> for Shape {
    fn from((n,): (usize,)) -> Self {
        Shape::vector(n)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((m, n): (usize, usize)) -> Self {
        Shape::matrix(m, n)
    }
}

impl From<(usize, usize, usize)> for Shape {
    fn from((a, b, c): (usize, usize, usize)) -> Self {
        Shape(vec![a, b, c])
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape(dims.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector() {
        let s = Shape::vector(5);
        assert_eq!(s.size(), 5);
        assert_eq!(s.ndim(), 1);
        assert_eq!(s.extent(0), Some(5));
        assert_eq!(s.extent(1), None);
    }

    #[test]
    fn test_matrix() {
        let s = Shape::matrix(3, 4);
        assert_eq!(s.size(), 12);
        assert_eq!(s.ndim(), 2);
        assert_eq!(s.to_string(), "(3, 4)");
    }

    #[test]
    fn test_index_sets() {
        assert_eq!(Shape::vector(4).index_sets(), "0..3");
        assert_eq!(Shape::matrix(3, 3).index_sets(), "0..2, 0..2");
        assert_eq!(Shape::from((3, 2, 4)).index_sets(), "0..2, 0..1, 0..3");
    }

    #[test]
    fn test_validate() {
        assert!(Shape::matrix(2, 2).validate().is_ok());
        assert!(Shape::from_dims(Vec::<usize>::new()).validate().is_err());
        assert!(Shape::matrix(2, 0).validate().is_err());
    }

    #[test]
    fn test_conversions() {
        let _: Shape = 5.into();
        let _: Shape = (5,).into();
        let _: Shape = (3, 4).into();
        let _: Shape = vec![1, 2, 3].into();
    }
}
