//! Array indexing and slicing.
//!
//! `Expr::at` resolves a possibly partial list of positions against an array
//! and produces a view with exactly one normalized position per dimension:
//! - missing trailing positions become full slices
//! - slice starts default to `0`
//! - slice stops default to a size query of the dimension
//!
//! Negative literals, literal indexes outside a known extent, steps other
//! than 1 and empty literal slices are rejected here, before any text is
//! produced.

use std::ops::{RangeFrom, RangeFull, RangeTo};
use std::sync::Arc;

use super::domain::Range;
use super::expression::{ArrayData, Expr, Pos, ViewData};
use crate::error::{Result, ZincError};

/// A position as written by the caller.
#[derive(Debug, Clone)]
pub enum Position {
    /// A single index.
    Index(Expr),
    /// A slice; `None` bounds take their defaults.
    Slice {
        start: Option<Expr>,
        stop: Option<Expr>,
        step: Option<i64>,
    },
}

impl Position {
    /// The full slice `..`.
    pub fn all() -> Self {
        Position::Slice {
            start: None,
            stop: None,
            step: None,
        }
    }

    /// The slice `start..stop`.
    pub fn slice(start: impl Into<Expr>, stop: impl Into<Expr>) -> Self {
        Position::Slice {
            start: Some(start.into()),
            stop: Some(stop.into()),
            step: None,
        }
    }

    /// The slice `start..stop` with an explicit step.
    pub fn slice_step(start: Option<Expr>, stop: Option<Expr>, step: i64) -> Self {
        Position::Slice {
            start,
            stop,
            step: Some(step),
        }
    }
}

impl From<Expr> for Position {
    fn from(e: Expr) -> Self {
        Position::Index(e)
    }
}

impl From<&Expr> for Position {
    fn from(e: &Expr) -> Self {
        Position::Index(e.clone())
    }
}

impl From<i64> for Position {
    fn from(i: i64) -> Self {
        Position::Index(i.into())
    }
}

impl From<i32> for Position {
    fn from(i: i32) -> Self {
        Position::Index(i.into())
    }
}

impl From<usize> for Position {
    fn from(i: usize) -> Self {
        Position::Index(i.into())
    }
}

impl From<RangeFull> for Position {
    fn from(_: RangeFull) -> Self {
        Position::all()
    }
}

impl From<RangeFrom<i64>> for Position {
    fn from(r: RangeFrom<i64>) -> Self {
        Position::Slice {
            start: Some(r.start.into()),
            stop: None,
            step: None,
        }
    }
}

impl From<RangeTo<i64>> for Position {
    fn from(r: RangeTo<i64>) -> Self {
        Position::Slice {
            start: None,
            stop: Some(r.end.into()),
            step: None,
        }
    }
}

impl From<std::ops::Range<i64>> for Position {
    fn from(r: std::ops::Range<i64>) -> Self {
        Position::slice(r.start, r.end)
    }
}

impl From<Range> for Position {
    fn from(r: Range) -> Self {
        Position::slice(r.start().clone(), r.stop().clone())
    }
}

/// Anything that can be turned into a list of positions: a single position
/// or a tuple of up to four.
pub trait IntoPositions {
    fn into_positions(self) -> Vec<Position>;
}

macro_rules! single_position {
    ($($t:ty),*) => {
        $(
            impl IntoPositions for $t {
                fn into_positions(self) -> Vec<Position> {
                    vec![self.into()]
                }
            }
        )*
    };
}

single_position!(
    Position,
    Expr,
    &Expr,
    i64,
    i32,
    usize,
    RangeFull,
    RangeFrom<i64>,
    RangeTo<i64>,
    std::ops::Range<i64>,
    Range
);

macro_rules! tuple_positions {
    ($($name:ident),+) => {
        impl<$($name: Into<Position>),+> IntoPositions for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_positions(self) -> Vec<Position> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

tuple_positions!(A, B);
tuple_positions!(A, B, C);
tuple_positions!(A, B, C, D);

impl IntoPositions for Vec<Position> {
    fn into_positions(self) -> Vec<Position> {
        self
    }
}

fn check_non_negative(e: &Expr) -> Result<()> {
    match e.as_int() {
        Some(v) if v < 0 => Err(ZincError::NegativeIndex(v)),
        _ => Ok(()),
    }
}

impl Expr {
    /// Index or slice an array.
    ///
    /// # Examples
    ///
    /// ```
    /// use zincrust::expr::array_par;
    ///
    /// let a = array_par(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    /// let elem = a.at((1, 2)).unwrap();   // a[1, 2]
    /// let row = a.at(1).unwrap();         // a[1, ..]
    /// let tail = a.at((.., 1..)).unwrap();  // a[.., 1..]
    /// ```
    pub fn at(&self, positions: impl IntoPositions) -> Result<Expr> {
        let array = match self {
            Expr::Array(array) => array,
            other => return Err(ZincError::NotAnArray(other.describe())),
        };
        let mut positions = positions.into_positions();
        let ndim = array.shape.ndim();
        if positions.len() > ndim {
            return Err(ZincError::TooManyIndices {
                ndim,
                given: positions.len(),
            });
        }
        positions.resize_with(ndim, Position::all);

        let base = Arc::new(self.clone());
        let positions = positions
            .into_iter()
            .enumerate()
            .map(|(dim, p)| normalize(&base, array, dim, p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Expr::View(ViewData {
            array: base,
            positions,
        }))
    }

    /// Extent of dimension `dim` of an array, as a solver-side query.
    pub fn size(&self, dim: usize) -> Result<Expr> {
        match self {
            Expr::Array(array) if dim < array.shape.ndim() => {
                Ok(Expr::Size(Arc::new(self.clone()), dim))
            }
            Expr::Array(array) => Err(ZincError::TooManyIndices {
                ndim: array.shape.ndim(),
                given: dim + 1,
            }),
            other => Err(ZincError::NotAnArray(other.describe())),
        }
    }
}

fn normalize(base: &Arc<Expr>, array: &ArrayData, dim: usize, position: Position) -> Result<Pos> {
    match position {
        Position::Index(index) => {
            check_non_negative(&index)?;
            if let (Some(i), Some(extent)) = (index.as_int(), array.shape.extent(dim)) {
                if i >= extent as i64 {
                    return Err(ZincError::IndexOutOfBounds {
                        index: i,
                        dim,
                        extent,
                    });
                }
            }
            Ok(Pos::Index(Arc::new(index)))
        }
        Position::Slice { start, stop, step } => {
            if let Some(step) = step.filter(|s| *s != 1) {
                return Err(ZincError::UnsupportedStep(step.to_string()));
            }
            let start = start.unwrap_or_else(|| Expr::from(0));
            let stop = stop.unwrap_or_else(|| Expr::Size(base.clone(), dim));
            check_non_negative(&start)?;
            check_non_negative(&stop)?;
            Range::new(start.clone(), stop.clone()).check()?;
            Ok(Pos::Slice {
                start: Arc::new(start),
                stop: Arc::new(stop),
            })
        }
    }
}
