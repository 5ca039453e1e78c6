//! Array creation and shape inference.
//!
//! Parameter arrays are built from nested host sequences. The shape is
//! inferred breadth first, one nesting level at a time, and the leaves are
//! stored flattened in row-major order.

use nalgebra::{DMatrix, Scalar};
use tracing::trace;

use super::domain::{Domain, EnumValue};
use super::expression::{ArrayData, ArrayKind, Expr, ExprId, Literal};
use super::shape::Shape;
use crate::error::{Result, ZincError};

/// A nested host sequence of literals.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested {
    Leaf(Literal),
    List(Vec<Nested>),
}

impl From<Literal> for Nested {
    fn from(v: Literal) -> Self {
        Nested::Leaf(v)
    }
}

impl From<i64> for Nested {
    fn from(v: i64) -> Self {
        Nested::Leaf(v.into())
    }
}

impl From<i32> for Nested {
    fn from(v: i32) -> Self {
        Nested::Leaf(v.into())
    }
}

impl From<f64> for Nested {
    fn from(v: f64) -> Self {
        Nested::Leaf(v.into())
    }
}

impl From<bool> for Nested {
    fn from(v: bool) -> Self {
        Nested::Leaf(v.into())
    }
}

impl From<EnumValue> for Nested {
    fn from(v: EnumValue) -> Self {
        Nested::Leaf(v.into())
    }
}

impl<T: Into<Nested>> From<Vec<T>> for Nested {
    fn from(v: Vec<T>) -> Self {
        Nested::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Nested>, const N: usize> From<[T; N]> for Nested {
    fn from(v: [T; N]) -> Self {
        Nested::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T> From<&DMatrix<T>> for Nested
where
    T: Scalar + Into<Literal>,
{
    fn from(m: &DMatrix<T>) -> Self {
        Nested::List(
            m.row_iter()
                .map(|row| Nested::List(row.iter().map(|v| Nested::Leaf(v.clone().into())).collect()))
                .collect(),
        )
    }
}

impl Nested {
    fn is_list(&self) -> bool {
        matches!(self, Nested::List(_))
    }

    fn type_name(&self) -> String {
        match self {
            Nested::Leaf(l) => l.elem_type().to_string(),
            Nested::List(_) => "array".into(),
        }
    }
}

/// Infer the shape of a nested sequence and flatten its leaves.
pub fn infer_shape(nested: &Nested) -> Result<(Shape, Vec<Literal>)> {
    let mut dims = Vec::new();
    let mut level = vec![nested];
    loop {
        let lists = level.iter().filter(|n| n.is_list()).count();
        if lists == 0 {
            break;
        }
        if lists != level.len() {
            let first = level[0];
            let other = level.iter().find(|n| n.is_list() != first.is_list());
            return Err(ZincError::MixedTypes {
                expected: first.type_name(),
                found: other.map(|n| n.type_name()).unwrap_or_default(),
            });
        }
        let mut expected = None;
        let mut next = Vec::new();
        for node in level.iter().copied() {
            if let Nested::List(items) = node {
                if items.is_empty() {
                    return Err(ZincError::EmptyCollection("array"));
                }
                match expected {
                    None => expected = Some(items.len()),
                    Some(len) if len != items.len() => {
                        return Err(ZincError::RaggedArray {
                            level: dims.len(),
                            expected: len,
                            found: items.len(),
                        });
                    }
                    Some(_) => {}
                }
                next.extend(items.iter());
            }
        }
        dims.extend(expected);
        level = next;
    }

    let shape = Shape::from(dims);
    shape.validate()?;
    let values: Vec<Literal> = level
        .into_iter()
        .filter_map(|n| match n {
            Nested::Leaf(l) => Some(l.clone()),
            Nested::List(_) => None,
        })
        .collect();
    let ty = values
        .first()
        .map(Literal::elem_type)
        .ok_or(ZincError::EmptyCollection("array"))?;
    if let Some(other) = values.iter().find(|v| v.elem_type() != ty) {
        return Err(ZincError::MixedTypes {
            expected: ty.to_string(),
            found: other.elem_type().to_string(),
        });
    }
    for v in &values {
        v.check()?;
    }
    trace!(%shape, "inferred array shape");
    Ok((shape, values))
}

/// Create a parameter array from a nested sequence.
///
/// # Examples
///
/// ```
/// use zincrust::expr::array_par;
///
/// let a = array_par(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
/// ```
pub fn array_par(values: impl Into<Nested>) -> Result<Expr> {
    let (shape, values) = infer_shape(&values.into())?;
    Ok(Expr::Array(ArrayData {
        id: ExprId::new(),
        kind: ArrayKind::Par(values),
        shape,
    }))
}

/// Create an array of decision variables sharing one domain.
pub fn array_var(domain: impl Into<Domain>, shape: impl Into<Shape>) -> Result<Expr> {
    let shape = shape.into();
    shape.validate()?;
    Ok(Expr::Array(ArrayData {
        id: ExprId::new(),
        kind: ArrayKind::Var(domain.into()),
        shape,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn par_parts(e: &Expr) -> (Shape, Vec<Literal>) {
        match e {
            Expr::Array(ArrayData {
                kind: ArrayKind::Par(values),
                shape,
                ..
            }) => (shape.clone(), values.clone()),
            _ => panic!("Expected parameter array"),
        }
    }

    #[test]
    fn test_shape_inference() {
        let a = array_par(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let (shape, values) = par_parts(&a);
        assert_eq!(shape, Shape::matrix(2, 3));
        let ints: Vec<_> = values
            .iter()
            .map(|v| match v {
                Literal::Int(i) => *i,
                _ => panic!("Expected int"),
            })
            .collect();
        assert_eq!(ints, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_three_dimensions() {
        let a = array_par([[[1, 2], [3, 4]], [[5, 6], [7, 8]]]).unwrap();
        assert_eq!(par_parts(&a).0, Shape::from((2, 2, 2)));
    }

    #[test]
    fn test_ragged() {
        let err = array_par(vec![vec![1, 2, 3], vec![4, 5]]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Subarrays of different length are not supported, length of all subarrays at level 1 should be 3, but one has 2"
        );
    }

    #[test]
    fn test_mixed_types() {
        let err = array_par(vec![Nested::from(1), Nested::from(2.5)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "All elements of the array should be the same type, but int and float were found"
        );
    }

    #[test]
    fn test_mixed_nesting() {
        let err = array_par(vec![Nested::from(vec![1]), Nested::from(2)]).unwrap_err();
        assert!(matches!(err, ZincError::MixedTypes { .. }));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            array_par(Vec::<i64>::new()),
            Err(ZincError::EmptyCollection("array"))
        ));
        assert!(matches!(
            array_par(vec![Vec::<i64>::new()]),
            Err(ZincError::EmptyCollection("array"))
        ));
    }

    #[test]
    fn test_non_finite_values() {
        assert!(matches!(
            array_par(vec![1.0, f64::NAN]),
            Err(ZincError::NonFiniteFloat(_))
        ));
        assert!(matches!(
            array_par(vec![vec![f64::INFINITY]]),
            Err(ZincError::NonFiniteFloat(_))
        ));
    }

    #[test]
    fn test_scalar_is_not_an_array() {
        assert!(matches!(array_par(5), Err(ZincError::InvalidShape(_))));
    }

    #[test]
    fn test_from_dmatrix() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let a = array_par(&m).unwrap();
        let (shape, values) = par_parts(&a);
        assert_eq!(shape, Shape::matrix(2, 2));
        assert_eq!(values[1], Literal::Float(2.0));
        assert_eq!(values[2], Literal::Float(3.0));
    }

    #[test]
    fn test_array_var() {
        assert!(array_var(0..5, 5).is_ok());
        assert!(matches!(array_var(0..5, 0), Err(ZincError::InvalidShape(_))));
    }
}
