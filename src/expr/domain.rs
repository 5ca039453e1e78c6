//! Domains of decision variables: primitive types, ranges and enumerations.

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, ZincError};

use super::expression::{Expr, Literal};

/// A half-open range `start..stop` with unit step.
///
/// Bounds are expressions, so a range can depend on parameters
/// (`Range::new(&a - 1, &b + 1)`). Integer ranges render as
/// `start..stop-1`, float ranges as `start..stop`.
#[derive(Debug, Clone)]
pub struct Range {
    start: Arc<Expr>,
    stop: Arc<Expr>,
}

impl Range {
    /// Create the range `start..stop`.
    pub fn new(start: impl Into<Expr>, stop: impl Into<Expr>) -> Self {
        Range {
            start: Arc::new(start.into()),
            stop: Arc::new(stop.into()),
        }
    }

    /// Create the range `0..stop`.
    pub fn upto(stop: impl Into<Expr>) -> Self {
        Range::new(0, stop)
    }

    /// Create a range with an explicit step. Only a step of 1 is supported.
    pub fn with_step(start: impl Into<Expr>, stop: impl Into<Expr>, step: i64) -> Result<Self> {
        if step != 1 {
            return Err(ZincError::UnsupportedStep(step.to_string()));
        }
        let range = Range::new(start, stop);
        range.check()?;
        Ok(range)
    }

    /// Lower bound (inclusive).
    pub fn start(&self) -> &Expr {
        &self.start
    }

    /// Upper bound (exclusive for integer ranges).
    pub fn stop(&self) -> &Expr {
        &self.stop
    }

    /// Reject ranges whose literal bounds are empty.
    pub fn check(&self) -> Result<()> {
        if let (Expr::Literal(start), Expr::Literal(stop)) = (self.start(), self.stop()) {
            let empty = match (start, stop) {
                (Literal::Int(a), Literal::Int(b)) => a >= b,
                (Literal::Float(a), Literal::Float(b)) => a >= b,
                (Literal::Int(a), Literal::Float(b)) => (*a as f64) >= *b,
                (Literal::Float(a), Literal::Int(b)) => *a >= (*b as f64),
                _ => false,
            };
            if empty {
                return Err(ZincError::InvalidRange {
                    start: start.to_string(),
                    stop: stop.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Shorthand for [`Range::new`].
pub fn range(start: impl Into<Expr>, stop: impl Into<Expr>) -> Range {
    Range::new(start, stop)
}

impl From<std::ops::Range<i64>> for Range {
    fn from(r: std::ops::Range<i64>) -> Self {
        Range::new(r.start, r.end)
    }
}

impl From<std::ops::Range<i32>> for Range {
    fn from(r: std::ops::Range<i32>) -> Self {
        Range::new(r.start, r.end)
    }
}

impl From<std::ops::Range<f64>> for Range {
    fn from(r: std::ops::Range<f64>) -> Self {
        Range::new(r.start, r.end)
    }
}

/// An enumeration type declared in the model (`enum Color = {Red, Green};`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumType(Arc<EnumInner>);

#[derive(Debug, PartialEq, Eq, Hash)]
struct EnumInner {
    name: String,
    variants: Vec<String>,
}

impl EnumType {
    /// Declare an enumeration with at least one variant.
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let variants: Vec<String> = variants.into_iter().map(Into::into).collect();
        if variants.is_empty() {
            return Err(ZincError::EmptyCollection("enum"));
        }
        Ok(EnumType(Arc::new(EnumInner {
            name: name.into(),
            variants,
        })))
    }

    /// Name of the enumeration.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Variant names in declaration order.
    pub fn variants(&self) -> &[String] {
        &self.0.variants
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.0.variants.len()
    }

    /// Always false, enumerations have at least one variant.
    pub fn is_empty(&self) -> bool {
        self.0.variants.is_empty()
    }

    /// Look up a variant by name.
    pub fn value(&self, variant: &str) -> Option<EnumValue> {
        self.0
            .variants
            .iter()
            .position(|v| v == variant)
            .map(|index| EnumValue {
                ty: self.clone(),
                index,
            })
    }

    /// All values of the enumeration in declaration order.
    pub fn values(&self) -> impl Iterator<Item = EnumValue> + '_ {
        (0..self.len()).map(move |index| EnumValue {
            ty: self.clone(),
            index,
        })
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single variant of an [`EnumType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    ty: EnumType,
    index: usize,
}

impl EnumValue {
    /// The enumeration this value belongs to.
    pub fn ty(&self) -> &EnumType {
        &self.ty
    }

    /// Variant name.
    pub fn name(&self) -> &str {
        &self.ty.variants()[self.index]
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone)]
pub enum Domain {
    /// Unbounded integer.
    Int,
    /// Unbounded float.
    Float,
    /// Boolean.
    Bool,
    /// Integer or float range.
    Range(Range),
    /// Enumeration.
    Enum(EnumType),
}

impl From<Range> for Domain {
    fn from(r: Range) -> Self {
        Domain::Range(r)
    }
}

impl From<std::ops::Range<i64>> for Domain {
    fn from(r: std::ops::Range<i64>) -> Self {
        Domain::Range(r.into())
    }
}

impl From<std::ops::Range<i32>> for Domain {
    fn from(r: std::ops::Range<i32>) -> Self {
        Domain::Range(r.into())
    }
}

impl From<std::ops::Range<f64>> for Domain {
    fn from(r: std::ops::Range<f64>) -> Self {
        Domain::Range(r.into())
    }
}

impl From<EnumType> for Domain {
    fn from(e: EnumType) -> Self {
        Domain::Enum(e)
    }
}

impl From<&EnumType> for Domain {
    fn from(e: &EnumType) -> Self {
        Domain::Enum(e.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_other_than_one() {
        let err = Range::with_step(0, 10, 2).unwrap_err();
        assert_eq!(err.to_string(), "step other than 1 isn't supported, but it is 2");
        assert!(Range::with_step(0, 10, 1).is_ok());
    }

    #[test]
    fn test_empty_literal_range() {
        let err = Range::new(10, 10).check().unwrap_err();
        assert_eq!(err.to_string(), "start(10) should be smaller than stop(10)");
        assert!(Range::new(1.5, 1.0).check().is_err());
        assert!(Range::upto(1).check().is_ok());
    }

    #[test]
    fn test_enum_values() {
        let color = EnumType::new("Color", ["Red", "Green", "Blue"]).unwrap();
        assert_eq!(color.len(), 3);
        let names: Vec<_> = color.values().map(|v| v.name().to_string()).collect();
        assert_eq!(names, ["Red", "Green", "Blue"]);
        assert_eq!(color.value("Green").unwrap().name(), "Green");
        assert!(color.value("Purple").is_none());
    }

    #[test]
    fn test_empty_enum() {
        let err = EnumType::new("Nothing", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ZincError::EmptyCollection("enum")));
    }
}
