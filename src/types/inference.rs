//! Element-type inference for expressions.
//!
//! Types are computed recursively from the leaves. Errors are raised for
//! arithmetic over booleans, logical connectives over non-constraints and
//! heterogeneous sequences.

use super::{widen, ElemType};
use crate::error::{Result, ZincError};
use crate::expr::{
    ArrayKind, BinaryOp, Domain, Expr, GlobalKind, Literal, ParamValue, Range, ReduceOp,
    ReduceSource, Reduction, SetKind, SetValues, UnaryOp,
};

impl Domain {
    /// Element type of values in the domain.
    pub fn elem_type(&self) -> Result<ElemType> {
        match self {
            Domain::Int => Ok(ElemType::Int),
            Domain::Float => Ok(ElemType::Float),
            Domain::Bool => Ok(ElemType::Bool),
            Domain::Range(r) => r.elem_type(),
            Domain::Enum(e) => Ok(ElemType::Enum(e.clone())),
        }
    }
}

impl Range {
    /// Element type of the range: int, or float if either bound is float.
    pub fn elem_type(&self) -> Result<ElemType> {
        let start = self.start().elem_type()?;
        let stop = self.stop().elem_type()?;
        for ty in [&start, &stop] {
            if matches!(ty, ElemType::Bool | ElemType::Enum(_)) {
                return Err(ZincError::UnsupportedType {
                    found: ty.to_string(),
                    context: "range bounds",
                });
            }
        }
        widen(&start, &stop)
    }
}

fn first_literal_type(values: &[Literal], what: &'static str) -> Result<ElemType> {
    values
        .first()
        .map(Literal::elem_type)
        .ok_or(ZincError::EmptyCollection(what))
}

/// Type of an operand that must be a scalar number.
fn scalar_operand(e: &Expr, context: &'static str) -> Result<ElemType> {
    if e.is_collection() {
        return Err(ZincError::UnsupportedType {
            found: e.describe(),
            context,
        });
    }
    e.elem_type()
}

/// Check that an operand of a logical operator is a constraint.
fn constraint_operand(e: &Expr, op: &'static str) -> Result<()> {
    if e.is_collection() || e.elem_type()? != ElemType::Bool {
        return Err(ZincError::NotAConstraint {
            op,
            found: e.describe(),
        });
    }
    Ok(())
}

impl Expr {
    /// Resolve the element type of the expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use zincrust::prelude::*;
    ///
    /// let x = var(Domain::Int);
    /// assert_eq!((&x + 1.5).elem_type().unwrap(), ElemType::Float);
    /// assert_eq!(x.lt(3).elem_type().unwrap(), ElemType::Bool);
    /// ```
    pub fn elem_type(&self) -> Result<ElemType> {
        match self {
            Expr::Literal(l) => Ok(l.elem_type()),
            Expr::Variable(v) => v.domain.elem_type(),
            Expr::Parameter(p) => match &p.value {
                ParamValue::Literal(l) => Ok(l.elem_type()),
                ParamValue::Derived(e) => e.elem_type(),
            },
            Expr::Array(a) => match &a.kind {
                ArrayKind::Var(domain) => domain.elem_type(),
                ArrayKind::Par(values) => first_literal_type(values, "array"),
            },
            Expr::Set(s) => match &s.kind {
                SetKind::Var(domain) => domain.elem_type(),
                SetKind::Par(SetValues::Values(values)) => first_literal_type(values, "set"),
                SetKind::Par(SetValues::Range { .. }) => Ok(ElemType::Int),
            },
            Expr::SetLiteral(values) => first_literal_type(values, "set"),
            Expr::View(view) => view.array.elem_type(),
            Expr::Range(r) => r.elem_type(),
            Expr::Seq(items) => {
                let (first, rest) = items
                    .split_first()
                    .ok_or(ZincError::EmptyCollection("sequence"))?;
                let ty = first.elem_type()?;
                for item in rest {
                    let other = item.elem_type()?;
                    if other != ty {
                        return Err(ZincError::MixedTypes {
                            expected: ty.to_string(),
                            found: other.to_string(),
                        });
                    }
                }
                Ok(ty)
            }
            Expr::EnumDomain(e) => Ok(ElemType::Enum(e.clone())),
            Expr::Iter(it) => Ok(it.ty.clone()),
            Expr::Unary(UnaryOp::Not, operand) => {
                constraint_operand(operand, "not")?;
                Ok(ElemType::Bool)
            }
            Expr::Unary(UnaryOp::Neg | UnaryOp::Abs, operand) => {
                widen(&scalar_operand(operand, "arithmetic")?, &ElemType::Int)
            }
            Expr::Binary(op, lhs, rhs) => binary_type(*op, lhs, rhs),
            Expr::Pow(base, exponent) => widen(
                &scalar_operand(base, "arithmetic")?,
                &scalar_operand(exponent, "arithmetic")?,
            ),
            Expr::Size(_, _) => Ok(ElemType::Int),
            Expr::Reduce(r) => reduction_type(r),
            Expr::Global(g) => {
                for arg in &g.args {
                    arg.elem_type()?;
                }
                match g.kind {
                    GlobalKind::NValue => Ok(ElemType::Int),
                    _ => Ok(ElemType::Bool),
                }
            }
        }
    }
}

fn binary_type(op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<ElemType> {
    if op.is_arithmetic() {
        let ty = widen(
            &scalar_operand(lhs, "arithmetic")?,
            &scalar_operand(rhs, "arithmetic")?,
        )?;
        return Ok(if op == BinaryOp::TrueDiv {
            ElemType::Float
        } else {
            ty
        });
    }
    if op.is_logical() {
        constraint_operand(lhs, op.symbol())?;
        constraint_operand(rhs, op.symbol())?;
        return Ok(ElemType::Bool);
    }
    // comparisons and membership
    lhs.elem_type()?;
    rhs.elem_type()?;
    Ok(ElemType::Bool)
}

fn reduction_type(r: &Reduction) -> Result<ElemType> {
    let elem = match &r.source {
        ReduceSource::Call(args) => {
            let (first, rest) = args
                .split_first()
                .ok_or(ZincError::EmptyCollection("sequence"))?;
            for arg in rest {
                arg.elem_type()?;
            }
            first.elem_type()?
        }
        ReduceSource::Generator { generators, body } => {
            for g in generators {
                g.domain.elem_type()?;
            }
            if r.op == ReduceOp::Count {
                constraint_operand(body, "count")?;
            }
            body.elem_type()?
        }
    };
    match r.op {
        ReduceOp::Sum | ReduceOp::Product => widen(&elem, &ElemType::Int),
        ReduceOp::Count => Ok(ElemType::Int),
        ReduceOp::Forall | ReduceOp::Exists => {
            if elem != ElemType::Bool {
                return Err(ZincError::NotAConstraint {
                    op: r.op.name(),
                    found: elem.to_string(),
                });
            }
            Ok(ElemType::Bool)
        }
        ReduceOp::Min | ReduceOp::Max => {
            if elem == ElemType::Bool {
                return Err(ZincError::AmbiguousType {
                    left: elem.to_string(),
                    right: elem.to_string(),
                });
            }
            Ok(elem)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{and, not, sum, ConstraintExt};
    use crate::expr::{array_par, array_var, par, seq, var, EnumType};

    #[test]
    fn test_leaf_types() {
        assert_eq!(var(Domain::Int).elem_type().unwrap(), ElemType::Int);
        assert_eq!(var(0..10).elem_type().unwrap(), ElemType::Int);
        assert_eq!(var(1.3..10.0).elem_type().unwrap(), ElemType::Float);
        assert_eq!(par(2.5).elem_type().unwrap(), ElemType::Float);
        let color = EnumType::new("Color", ["Red", "Green"]).unwrap();
        assert_eq!(
            var(&color).elem_type().unwrap(),
            ElemType::Enum(color.clone())
        );
    }

    #[test]
    fn test_arithmetic_widening() {
        let i = var(Domain::Int);
        let f = var(Domain::Float);
        assert_eq!((&i * 2).elem_type().unwrap(), ElemType::Int);
        assert_eq!((&i + &f).elem_type().unwrap(), ElemType::Float);
        assert_eq!(
            crate::atoms::true_div(&i, 2).elem_type().unwrap(),
            ElemType::Float
        );
    }

    #[test]
    fn test_bool_arithmetic_is_an_error() {
        let b = var(Domain::Bool);
        assert!(matches!(
            (&b + 1).elem_type(),
            Err(ZincError::AmbiguousType { .. })
        ));
    }

    #[test]
    fn test_logic_requires_constraints() {
        let x = var(Domain::Int);
        let ok = and(x.lt(3), x.gt(0));
        assert_eq!(ok.elem_type().unwrap(), ElemType::Bool);
        let bad = and(&x, x.gt(0));
        assert!(matches!(
            bad.elem_type(),
            Err(ZincError::NotAConstraint { op: "/\\", .. })
        ));
        assert!(matches!(
            not(&x).elem_type(),
            Err(ZincError::NotAConstraint { op: "not", .. })
        ));
    }

    #[test]
    fn test_reductions() {
        let a = array_var(0..5, (2, 2)).unwrap();
        assert_eq!(sum(&a).unwrap().elem_type().unwrap(), ElemType::Int);
        let f = array_par(vec![1.5, 2.5]).unwrap();
        assert_eq!(sum(&f).unwrap().elem_type().unwrap(), ElemType::Float);
    }

    #[test]
    fn test_mixed_sequence() {
        let s = seq([Expr::from(1), Expr::from(2.0)]);
        assert!(matches!(s.elem_type(), Err(ZincError::MixedTypes { .. })));
        assert!(matches!(
            seq(Vec::<Expr>::new()).elem_type(),
            Err(ZincError::EmptyCollection("sequence"))
        ));
    }

    #[test]
    fn test_arithmetic_on_collection() {
        let a = array_var(0..5, 3).unwrap();
        assert!(matches!(
            (&a + 1).elem_type(),
            Err(ZincError::UnsupportedType { .. })
        ));
    }
}
